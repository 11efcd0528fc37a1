//! Image generation — an independent, stateless utility next to the text
//! pipeline. No fallback: every failure is returned to the caller.

use tracing::info;

use crate::generation::prompts::IMAGE_PROMPT_PREFIX;
use crate::image_client::{ImageError, ImageProvider, ImageRequest};

/// stability-ai/sdxl, pinned.
pub const SDXL_VERSION: &str = "39ed52f2a78e934b3ba6e2a89f5b1c712de7dfea535525255b1aa35c5565e08b";
pub const IMAGE_WIDTH: u32 = 1024;
pub const IMAGE_HEIGHT: u32 = 576;

/// Generates one hero-sized image and returns its reference (URL).
pub async fn generate_image(
    prompt: &str,
    api_key: &str,
    image_provider: &dyn ImageProvider,
) -> Result<String, ImageError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ImageError::MissingCredential);
    }

    let full_prompt = format!("{IMAGE_PROMPT_PREFIX}{prompt}");
    let request = ImageRequest {
        version: SDXL_VERSION,
        prompt: &full_prompt,
        width: IMAGE_WIDTH,
        height: IMAGE_HEIGHT,
    };

    let image = image_provider
        .generate(api_key, &request)
        .await?
        .into_iter()
        .next()
        .ok_or(ImageError::EmptyOutput)?;

    info!("Generated image {image}");
    Ok(image)
}
