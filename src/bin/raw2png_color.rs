// 该文件是 Danqing （丹青） 项目的一部分。
// src/bin/raw2png_color.rs - 彩色 RAW 转 PNG 程序
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use danqing::{
  convert::{ConvertError, ConvertRequest, convert},
  tensor::Endian,
};

/// 彩色 RAW 转 PNG 参数配置
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
  /// 输入 RAW 文件路径
  #[arg(value_name = "INPUT")]
  pub input: PathBuf,

  /// 输出 PNG 文件路径
  #[arg(value_name = "OUTPUT")]
  pub output: PathBuf,

  /// 图像宽度（像素）
  #[arg(long, value_name = "WIDTH")]
  pub width: u32,

  /// 图像高度（像素）
  #[arg(long, value_name = "HEIGHT")]
  pub height: u32,

  /// 位深度（仅支持 8）
  #[arg(long, default_value = "8", value_name = "DEPTH")]
  pub bit_depth: u32,

  /// 每像素采样数（3 为 RGB）
  #[arg(long, default_value = "3", value_name = "CHANNELS")]
  pub channels: u32,
}

fn main() {
  tracing_subscriber::fmt::init();

  let args = Args::parse();

  info!("输入文件: {}", args.input.display());
  info!("输出文件: {}", args.output.display());
  info!("图像尺寸: {}x{}", args.width, args.height);
  info!("位深度: {}, 通道数: {}", args.bit_depth, args.channels);

  if let Err(err) = run(&args) {
    error!("转换 {} 失败: {}", args.input.display(), err);
    std::process::exit(err.exit_code());
  }
}

fn run(args: &Args) -> Result<(), ConvertError> {
  if !args.input.is_file() {
    return Err(ConvertError::MissingInput(args.input.clone()));
  }

  // 彩色变体仅支持 8 位，先于文件大小校验
  if args.bit_depth != 8 {
    return Err(ConvertError::UnsupportedBitDepth(args.bit_depth));
  }

  convert(&ConvertRequest {
    input: args.input.clone(),
    output: args.output.clone(),
    width: args.width,
    height: args.height,
    bit_depth: args.bit_depth,
    channels: args.channels,
    endian: Endian::Little,
  })
}
