// 该文件是 Danqing （丹青） 项目的一部分。
// src/input/raw_file.rs - RAW 文件输入
//
// 本程序遵循 GNU Affero 通用公共许可证（AGPL）许可协议。
// 本程序的发布旨在提供实用价值，但不作任何形式的担保，
// 包括但不限于对适销性或特定用途适用性的默示担保。
// 更多详情请参阅 GNU 通用公共许可证。
//
// Copyright (C) 2026 Johann Li <me@qinka.pro>, ETVP

use std::path::Path;

use tracing::error;

use crate::{
  convert::ConvertError,
  tensor::{Endian, PixelData, SampleDepth, TensorShape},
};

/// 无文件头的平铺采样文件输入
pub struct RawFileInput<'a> {
  path: &'a Path,
  depth: SampleDepth,
  endian: Endian,
}

impl<'a> RawFileInput<'a> {
  pub fn new(path: &'a Path, depth: SampleDepth, endian: Endian) -> Self {
    RawFileInput {
      path,
      depth,
      endian,
    }
  }

  /// 读取整个文件并解码为采样序列
  ///
  /// 读取前按文件元数据预校验字节数，大小不符时不分配缓冲区。
  pub fn read(&self, shape: TensorShape) -> Result<PixelData, ConvertError> {
    let metadata = std::fs::metadata(self.path)?;
    let expected_bytes = shape.byte_count(self.depth);

    if metadata.len() != expected_bytes {
      error!(
        "文件大小不匹配: {} 期望 {} 字节, 实际 {} 字节",
        self.path.display(),
        expected_bytes,
        metadata.len()
      );
      return Err(ConvertError::SizeMismatch {
        expected: shape.sample_count(),
        actual: (metadata.len() / self.depth.bytes_per_sample() as u64) as usize,
      });
    }

    let bytes = std::fs::read(self.path)?;
    Ok(PixelData::decode(bytes, self.depth, self.endian))
  }
}
