// 该文件是 Danqing （丹青） 项目的一部分。
// src/output/png_file.rs - 保存 PNG 文件
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

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::warn;

use crate::convert::ConvertError;

/// PNG 文件输出
pub struct PngFileOutput<'a> {
  path: &'a Path,
}

impl<'a> PngFileOutput<'a> {
  pub fn new(path: &'a Path) -> Self {
    PngFileOutput { path }
  }

  /// 以编码器默认参数保存图像，已有文件会被覆盖
  pub fn save(&self, image: &DynamicImage) -> Result<(), ConvertError> {
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }

    image.save_with_format(self.path, ImageFormat::Png)?;

    warn!("保存图像到文件: {}", self.path.display());

    Ok(())
  }
}
