//! Single-page PDF encoding with printpdf.

use printpdf::image_crate::{self, DynamicImage};
use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use crate::export::fit::{fit_to_page, pt_to_mm, PageFormat};
use crate::export::rasterizer::RasterImage;
use crate::export::ExportError;

/// Embeds `image` on one portrait page of `page`, scaled to fit and anchored
/// to the top edge. CPU-bound; call from a blocking thread.
pub fn encode_pdf(image: &RasterImage, page: PageFormat) -> Result<Vec<u8>, ExportError> {
    let decoded = image_crate::load_from_memory(&image.png)
        .map_err(|e| ExportError::Encode(format!("invalid PNG: {e}")))?;
    // PDF images carry no alpha channel here.
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());

    let placement = fit_to_page(page, rgb.width(), rgb.height());

    let (doc, page_index, layer_index) = PdfDocument::new(
        "ResuMaster AI Resume",
        Mm(page.width_mm()),
        Mm(page.height_mm()),
        "Resume",
    );
    let layer = doc.get_page(page_index).get_layer(layer_index);

    // printpdf places images from the bottom-left corner.
    let bottom_pt = page.height_pt - placement.y - placement.height;
    Image::from_dynamic_image(&rgb).add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(pt_to_mm(placement.x))),
            translate_y: Some(Mm(pt_to_mm(bottom_pt))),
            scale_x: Some(placement.ratio),
            scale_y: Some(placement.ratio),
            // One pixel is one point before scaling.
            dpi: Some(72.0),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| ExportError::Encode(format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::rasterizer::tests::white_png;

    #[test]
    fn test_encodes_single_page_pdf() {
        let image = RasterImage::from_png(white_png(120, 170)).unwrap();
        let bytes = encode_pdf(&image, PageFormat::A4).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 200);
    }

    #[test]
    fn test_invalid_png_is_encode_error() {
        let image = RasterImage {
            png: bytes::Bytes::from_static(b"nope"),
            width: 1,
            height: 1,
        };
        assert!(matches!(
            encode_pdf(&image, PageFormat::A4),
            Err(ExportError::Encode(_))
        ));
    }
}
