//! Conversion between `html-to-markdown-rs` inline images and [`ExtractedImage`].

use std::collections::HashMap;

use bytes::Bytes;
use html_to_markdown_rs::{InlineImage, InlineImageFormat};

use crate::types::ExtractedImage;

fn inline_image_format_to_str(format: &InlineImageFormat) -> String {
    match format {
        InlineImageFormat::Png => "png".to_string(),
        InlineImageFormat::Jpeg => "jpeg".to_string(),
        InlineImageFormat::Gif => "gif".to_string(),
        InlineImageFormat::Bmp => "bmp".to_string(),
        InlineImageFormat::Webp => "webp".to_string(),
        InlineImageFormat::Svg => "svg".to_string(),
        InlineImageFormat::Other(custom) => {
            let trimmed = custom.trim();
            if trimmed.is_empty() {
                return "bin".to_string();
            }

            let lower = trimmed.to_ascii_lowercase();
            if lower.starts_with("svg") {
                return "svg".to_string();
            }

            let mut candidate = lower.as_str();

            if let Some(idx) = candidate.find(['+', ';']) {
                candidate = &candidate[..idx];
            }

            if let Some(idx) = candidate.rfind('.') {
                candidate = &candidate[idx + 1..];
            }

            candidate = candidate.trim_start_matches("x-");

            if candidate.is_empty() {
                "bin".to_string()
            } else {
                candidate.to_string()
            }
        }
    }
}

pub(crate) fn inline_image_to_extracted(index: usize, image: InlineImage) -> ExtractedImage {
    let format = inline_image_format_to_str(&image.format);
    let _attributes: HashMap<String, String> = image.attributes.into_iter().collect();

    ExtractedImage {
        data: Bytes::from(image.data),
        format: format.into(),
        image_index: index,
        page_number: None,
        width: image.dimensions.map(|(w, _)| w),
        height: image.dimensions.map(|(_, h)| h),
        colorspace: None,
        bits_per_component: None,
        is_mask: false,
        description: image.description,
    }
}
