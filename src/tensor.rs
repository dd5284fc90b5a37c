// 该文件是 Danqing （丹青） 项目的一部分。
// src/tensor.rs - 像素张量定义
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

use image::{DynamicImage, ImageBuffer};

use crate::convert::ConvertError;

/// 采样位宽
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
  /// 8 位无符号整数采样
  U8,
  /// 16 位无符号整数采样
  U16,
}

impl SampleDepth {
  /// 由位深度映射采样位宽，仅支持 8 与 16
  pub fn from_bit_depth(bit_depth: u32) -> Result<Self, ConvertError> {
    match bit_depth {
      8 => Ok(SampleDepth::U8),
      16 => Ok(SampleDepth::U16),
      other => Err(ConvertError::UnsupportedBitDepth(other)),
    }
  }

  /// 单个采样占用的字节数
  pub fn bytes_per_sample(&self) -> usize {
    match self {
      SampleDepth::U8 => 1,
      SampleDepth::U16 => 2,
    }
  }
}

/// 多字节采样的字节序
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Endian {
  /// 小端序
  Little,
  /// 大端序
  Big,
}

/// 目标张量形状，行优先，行间无填充
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TensorShape {
  pub height: u32,
  pub width: u32,
  pub channels: u32,
}

impl TensorShape {
  pub fn new(height: u32, width: u32, channels: u32) -> Self {
    TensorShape {
      height,
      width,
      channels,
    }
  }

  /// 张量包含的采样总数
  pub fn sample_count(&self) -> usize {
    self.height as usize * self.width as usize * self.channels as usize
  }

  /// 按采样位宽折算的字节总数
  pub fn byte_count(&self, depth: SampleDepth) -> u64 {
    self.sample_count() as u64 * depth.bytes_per_sample() as u64
  }
}

/// 平铺的采样缓冲区
#[derive(Debug, Clone)]
pub enum PixelData {
  U8(Vec<u8>),
  U16(Vec<u16>),
}

impl PixelData {
  /// 按字节序把文件字节解码为采样序列
  pub fn decode(bytes: Vec<u8>, depth: SampleDepth, endian: Endian) -> Self {
    match depth {
      SampleDepth::U8 => PixelData::U8(bytes),
      SampleDepth::U16 => {
        let samples = bytes
          .chunks_exact(2)
          .map(|pair| match endian {
            Endian::Little => u16::from_le_bytes([pair[0], pair[1]]),
            Endian::Big => u16::from_be_bytes([pair[0], pair[1]]),
          })
          .collect();
        PixelData::U16(samples)
      }
    }
  }

  /// 采样数量
  pub fn len(&self) -> usize {
    match self {
      PixelData::U8(data) => data.len(),
      PixelData::U16(data) => data.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// 形状化的像素张量
///
/// 构造时校验采样数量与形状一致，编码时按通道数推断 PNG 颜色模式。
#[derive(Debug, Clone)]
pub struct PixelTensor {
  shape: TensorShape,
  data: PixelData,
}

impl PixelTensor {
  /// 构造张量，采样数量必须等于 height × width × channels
  pub fn new(shape: TensorShape, data: PixelData) -> Result<Self, ConvertError> {
    if data.len() != shape.sample_count() {
      return Err(ConvertError::SizeMismatch {
        expected: shape.sample_count(),
        actual: data.len(),
      });
    }

    Ok(PixelTensor { shape, data })
  }

  pub fn shape(&self) -> TensorShape {
    self.shape
  }

  /// 按通道数推断颜色模式: 1 → 灰度, 2 → 灰度加透明, 3 → RGB, 4 → RGBA
  pub fn into_image(self) -> Result<DynamicImage, ConvertError> {
    let TensorShape {
      height,
      width,
      channels,
    } = self.shape;
    let expected = self.shape.sample_count();
    let actual = self.data.len();

    let image = match (self.data, channels) {
      (PixelData::U8(data), 1) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLuma8)
      }
      (PixelData::U8(data), 2) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLumaA8)
      }
      (PixelData::U8(data), 3) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgb8)
      }
      (PixelData::U8(data), 4) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgba8)
      }
      (PixelData::U16(data), 1) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLuma16)
      }
      (PixelData::U16(data), 2) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageLumaA16)
      }
      (PixelData::U16(data), 3) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgb16)
      }
      (PixelData::U16(data), 4) => {
        ImageBuffer::from_raw(width, height, data).map(DynamicImage::ImageRgba16)
      }
      (_, other) => return Err(ConvertError::UnsupportedChannels(other)),
    };

    image.ok_or(ConvertError::SizeMismatch { expected, actual })
  }
}
