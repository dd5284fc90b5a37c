// 该文件是 Danqing （丹青） 项目的一部分。
// src/convert.rs - 统一转换流程
//
// 本文件根据 Apache 许可证第 2.0 版（以下简称“许可证”）授权使用；
// 除非遵守该许可证条款，否则您不得使用本文件。
// 您可通过以下网址获取许可证副本：
// http://www.apache.org/licenses/LICENSE-2.0
// 除非适用法律要求或书面同意，根据本许可协议分发的软件均按“原样”提供，
// 不附带任何形式的明示或暗示的保证或条件。
// 有关许可权限与限制的具体条款，请参阅本许可协议。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, Wareless Group

use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::{
  input::RawFileInput,
  output::PngFileOutput,
  tensor::{Endian, PixelTensor, SampleDepth, TensorShape},
};

/// 一次转换的全部参数
///
/// 由命令行程序构造，传入 [`convert`] 后只读使用。
#[derive(Debug, Clone)]
pub struct ConvertRequest {
  /// 输入 RAW 文件路径
  pub input: PathBuf,
  /// 输出 PNG 文件路径
  pub output: PathBuf,
  /// 图像宽度（像素）
  pub width: u32,
  /// 图像高度（像素）
  pub height: u32,
  /// 位深度，由转换流程校验
  pub bit_depth: u32,
  /// 每像素采样数
  pub channels: u32,
  /// 16 位采样的字节序
  pub endian: Endian,
}

/// 转换错误
#[derive(Error, Debug)]
pub enum ConvertError {
  #[error("输入文件不存在: {0}")]
  MissingInput(PathBuf),
  #[error("不支持的位深度: {0}")]
  UnsupportedBitDepth(u32),
  #[error("不支持的通道数: {0}")]
  UnsupportedChannels(u32),
  #[error("数据长度不匹配: 期望 {expected} 个采样, 实际 {actual} 个采样")]
  SizeMismatch { expected: usize, actual: usize },
  #[error("I/O 错误: {0}")]
  Io(#[from] std::io::Error),
  #[error("PNG 编码错误: {0}")]
  Encode(#[from] image::ImageError),
}

impl ConvertError {
  /// 每类错误对应一个固定的非零退出码
  pub fn exit_code(&self) -> i32 {
    match self {
      ConvertError::MissingInput(_) => 2,
      ConvertError::UnsupportedBitDepth(_) => 3,
      ConvertError::UnsupportedChannels(_) => 4,
      ConvertError::SizeMismatch { .. } => 5,
      ConvertError::Io(_) => 6,
      ConvertError::Encode(_) => 7,
    }
  }
}

/// 统一转换流程
///
/// 校验位深度与通道数，再按文件大小预校验采样数量，随后读入采样、
/// 重组为张量并编码为 PNG。任何一步失败都不会写出输出文件。
pub fn convert(request: &ConvertRequest) -> Result<(), ConvertError> {
  let depth = SampleDepth::from_bit_depth(request.bit_depth)?;
  let shape = TensorShape::new(request.height, request.width, request.channels);
  if !(1..=4).contains(&shape.channels) {
    return Err(ConvertError::UnsupportedChannels(shape.channels));
  }

  let data = RawFileInput::new(&request.input, depth, request.endian).read(shape)?;
  let tensor = PixelTensor::new(shape, data)?;
  let image = tensor.into_image()?;

  PngFileOutput::new(&request.output).save(&image)?;

  info!(
    "成功转换 {} 到 {}",
    request.input.display(),
    request.output.display()
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  use tempfile::TempDir;

  fn request(input: PathBuf, output: PathBuf, width: u32, height: u32) -> ConvertRequest {
    ConvertRequest {
      input,
      output,
      width,
      height,
      bit_depth: 8,
      channels: 1,
      endian: Endian::Little,
    }
  }

  #[test]
  fn gray_u8_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("gradient.raw");
    let output = dir.path().join("gradient.png");
    let samples: Vec<u8> = (0..100).collect();
    std::fs::write(&input, &samples).unwrap();

    convert(&request(input, output.clone(), 10, 10)).unwrap();

    let decoded = image::open(&output).unwrap();
    let gray = decoded.as_luma8().expect("expected 8-bit grayscale PNG");
    for row in 0..10u32 {
      for col in 0..10u32 {
        assert_eq!(
          gray.get_pixel(col, row).0[0],
          (row * 10 + col) as u8,
          "pixel ({}, {}) should equal its raw byte",
          row,
          col
        );
      }
    }
  }

  #[test]
  fn gray_u16_round_trip_little_endian() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deep.raw");
    let output = dir.path().join("deep.png");
    let samples: Vec<u16> = vec![0, 256, 4095, 65535];
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_le_bytes()).collect();
    std::fs::write(&input, &bytes).unwrap();

    let mut req = request(input, output.clone(), 2, 2);
    req.bit_depth = 16;
    convert(&req).unwrap();

    let decoded = image::open(&output).unwrap();
    let gray = decoded.as_luma16().expect("expected 16-bit grayscale PNG");
    assert_eq!(gray.get_pixel(0, 0).0[0], 0);
    assert_eq!(gray.get_pixel(1, 0).0[0], 256);
    assert_eq!(gray.get_pixel(0, 1).0[0], 4095);
    assert_eq!(gray.get_pixel(1, 1).0[0], 65535);
  }

  #[test]
  fn gray_u16_round_trip_big_endian() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("deep-be.raw");
    let output = dir.path().join("deep-be.png");
    let samples: Vec<u16> = vec![0x1234, 0xff00];
    let bytes: Vec<u8> = samples.iter().flat_map(|s| s.to_be_bytes()).collect();
    std::fs::write(&input, &bytes).unwrap();

    let mut req = request(input, output.clone(), 2, 1);
    req.bit_depth = 16;
    req.endian = Endian::Big;
    convert(&req).unwrap();

    let decoded = image::open(&output).unwrap();
    let gray = decoded.as_luma16().expect("expected 16-bit grayscale PNG");
    assert_eq!(gray.get_pixel(0, 0).0[0], 0x1234);
    assert_eq!(gray.get_pixel(1, 0).0[0], 0xff00);
  }

  #[test]
  fn rgb_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("color.raw");
    let output = dir.path().join("color.png");
    let samples: Vec<u8> = (0..30_000).map(|i| (i % 251) as u8).collect();
    std::fs::write(&input, &samples).unwrap();

    let mut req = request(input, output.clone(), 100, 100);
    req.channels = 3;
    convert(&req).unwrap();

    let decoded = image::open(&output).unwrap();
    let rgb = decoded.as_rgb8().expect("expected 8-bit RGB PNG");
    for &(row, col) in &[(0u32, 0u32), (0, 99), (42, 17), (99, 99)] {
      let base = ((row * 100 + col) * 3) as usize;
      assert_eq!(
        rgb.get_pixel(col, row).0,
        [samples[base], samples[base + 1], samples[base + 2]],
        "pixel ({}, {}) should equal its interleaved raw bytes",
        row,
        col
      );
    }
  }

  #[test]
  fn unsupported_bit_depth_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.raw");
    let output = dir.path().join("output.png");
    std::fs::write(&input, [0u8; 4]).unwrap();

    let mut req = request(input, output.clone(), 2, 2);
    req.bit_depth = 12;
    let err = convert(&req).unwrap_err();

    assert!(matches!(err, ConvertError::UnsupportedBitDepth(12)));
    assert_eq!(err.exit_code(), 3);
    assert!(!output.exists(), "no output file may be written on failure");
  }

  #[test]
  fn short_color_buffer_reports_both_counts() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("short.raw");
    let output = dir.path().join("short.png");
    std::fs::write(&input, vec![0u8; 29_999]).unwrap();

    let mut req = request(input, output.clone(), 100, 100);
    req.channels = 3;
    let err = convert(&req).unwrap_err();

    match err {
      ConvertError::SizeMismatch { expected, actual } => {
        assert_eq!(expected, 30_000);
        assert_eq!(actual, 29_999);
      }
      other => panic!("expected size mismatch, got {:?}", other),
    }
    assert!(!output.exists(), "no output file may be written on failure");
  }

  #[test]
  fn short_gray_buffer_fails_the_same_way() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("short-gray.raw");
    let output = dir.path().join("short-gray.png");
    std::fs::write(&input, vec![0u8; 99]).unwrap();

    let err = convert(&request(input, output.clone(), 10, 10)).unwrap_err();

    match err {
      ConvertError::SizeMismatch { expected, actual } => {
        assert_eq!(expected, 100);
        assert_eq!(actual, 99);
      }
      other => panic!("expected size mismatch, got {:?}", other),
    }
    assert!(!output.exists(), "no output file may be written on failure");
  }

  #[test]
  fn repeated_conversion_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("stable.raw");
    let first = dir.path().join("first.png");
    let second = dir.path().join("second.png");
    let samples: Vec<u8> = (0..64).map(|i| i * 4).collect();
    std::fs::write(&input, &samples).unwrap();

    convert(&request(input.clone(), first.clone(), 8, 8)).unwrap();
    convert(&request(input, second.clone(), 8, 8)).unwrap();

    assert_eq!(
      std::fs::read(&first).unwrap(),
      std::fs::read(&second).unwrap(),
      "same inputs must encode to identical bytes"
    );
  }

  #[test]
  fn output_parent_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("flat.raw");
    let output = dir.path().join("nested").join("dirs").join("flat.png");
    std::fs::write(&input, [7u8; 4]).unwrap();

    convert(&request(input, output.clone(), 2, 2)).unwrap();

    assert!(output.exists());
  }

  #[test]
  fn existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("over.raw");
    let output = dir.path().join("over.png");
    std::fs::write(&input, [1u8; 4]).unwrap();
    std::fs::write(&output, b"stale contents").unwrap();

    convert(&request(input, output.clone(), 2, 2)).unwrap();

    let decoded = image::open(&output).unwrap();
    assert!(decoded.as_luma8().is_some());
  }
}
