//! Profile photo validation.
//!
//! A photo is accepted when the file is at most 5 MiB, has an `image/*` MIME
//! type and decodes to an image with equal width and height. The accepted
//! photo is kept as a base64 data URI, usable both as an `<img>` source and
//! as the registration payload.

use gloo::file::{futures::read_as_data_url, File};
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

pub const MAX_AVATAR_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AvatarError {
    #[error("Image must be less than 5MB")]
    TooLarge,

    #[error("Please upload an image file")]
    NotAnImage,

    #[error("Image must be 1:1 ratio (square). Current: {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("Could not read the selected file")]
    Read(String),

    #[error("Could not decode the selected image")]
    Decode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub data_url: String,
    pub dimensions: Dimensions,
}

/// Checks that run before the file is read.
pub fn check_file(size: u64, mime_type: &str) -> Result<(), AvatarError> {
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge);
    }

    if !mime_type.starts_with("image/") {
        return Err(AvatarError::NotAnImage);
    }

    Ok(())
}

pub fn check_square(dimensions: Dimensions) -> Result<(), AvatarError> {
    let Dimensions { width, height } = dimensions;

    if width != height {
        return Err(AvatarError::NotSquare { width, height });
    }

    Ok(())
}

/// Reads `file` into a data URI and decodes it to find its size. The
/// returned avatar is not yet checked for squareness.
pub async fn load(file: web_sys::File) -> Result<Avatar, AvatarError> {
    let data_url = read_as_data_url(&File::from(file))
        .await
        .map_err(|e| AvatarError::Read(format!("{:?}", e)))?;
    let dimensions = decode_dimensions(&data_url).await?;

    Ok(Avatar {
        data_url,
        dimensions,
    })
}

pub async fn decode_dimensions(src: &str) -> Result<Dimensions, AvatarError> {
    let image = HtmlImageElement::new().map_err(|e| AvatarError::Decode(format!("{:?}", e)))?;
    image.set_src(src);

    JsFuture::from(image.decode())
        .await
        .map_err(|e| AvatarError::Decode(format!("{:?}", e)))?;

    Ok(Dimensions {
        width: image.natural_width(),
        height: image.natural_height(),
    })
}
