//! HTML processing with optional inline image extraction.

use html_to_markdown_rs::{ConversionOptions, InlineImageConfig, convert_with_inline_images};

use super::image_handling::inline_image_to_extracted;
use super::stack_management::{check_wasm_size_limit, html_requires_large_stack, run_on_dedicated_stack};
use super::types::HtmlExtractionResult;
use crate::error::{KreuzbergError, Result};

#[cfg(not(target_arch = "wasm32"))]
fn convert_inline_images_with_large_stack(
    html: String,
    options: ConversionOptions,
    image_config: InlineImageConfig,
) -> Result<html_to_markdown_rs::HtmlExtraction> {
    run_on_dedicated_stack(move || convert_inline_images_with_options(&html, options, image_config))
}

fn convert_inline_images_with_options(
    html: &str,
    options: ConversionOptions,
    image_config: InlineImageConfig,
) -> Result<html_to_markdown_rs::HtmlExtraction> {
    convert_with_inline_images(html, Some(options), image_config)
        .map_err(|e| KreuzbergError::parsing(format!("Failed to convert HTML to Markdown with images: {}", e)))
}

/// Process HTML with optional inline base64/data-URI image extraction.
///
/// Without `extract_images`, delegates to [`super::converter::convert_html_to_markdown`].
pub fn process_html(
    html: &str,
    options: Option<ConversionOptions>,
    extract_images: bool,
    max_image_size: u64,
) -> Result<HtmlExtractionResult> {
    check_wasm_size_limit(html)?;

    if !extract_images {
        let markdown = super::converter::convert_html_to_markdown(html, options, None)?;
        return Ok(HtmlExtractionResult {
            markdown,
            images: Vec::new(),
            warnings: Vec::new(),
        });
    }

    let options = super::converter::resolve_conversion_options(options, crate::core::config::OutputFormat::Markdown);
    let mut img_config = InlineImageConfig::new(max_image_size);
    img_config.filename_prefix = Some("inline-image".to_string());

    #[cfg(not(target_arch = "wasm32"))]
    let extraction = if html_requires_large_stack(html.len()) {
        convert_inline_images_with_large_stack(html.to_string(), options, img_config)?
    } else {
        convert_inline_images_with_options(html, options, img_config)?
    };

    #[cfg(target_arch = "wasm32")]
    let extraction = convert_inline_images_with_options(html, options, img_config)?;

    let images = extraction
        .inline_images
        .into_iter()
        .enumerate()
        .map(|(i, image)| inline_image_to_extracted(i, image))
        .collect();

    let warnings = extraction.warnings.into_iter().map(|w| w.message).collect();

    Ok(HtmlExtractionResult {
        markdown: extraction.markdown,
        images,
        warnings,
    })
}
