//! Fits a raster image onto a PDF page.

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageFormat {
    /// A4 portrait: 210 × 297 mm.
    pub const A4: PageFormat = PageFormat {
        width_pt: 595.28,
        height_pt: 841.89,
    };

    pub fn width_mm(&self) -> f32 {
        pt_to_mm(self.width_pt)
    }

    pub fn height_mm(&self) -> f32 {
        pt_to_mm(self.height_pt)
    }
}

/// Where the image lands on the page. `x`/`y` are measured from the top-left
/// corner in points; `ratio` is the uniform scale applied to the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub ratio: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Scales the image uniformly so it fits inside the page, centred
/// horizontally and anchored to the top edge.
pub fn fit_to_page(page: PageFormat, image_width: u32, image_height: u32) -> Placement {
    let iw = image_width.max(1) as f32;
    let ih = image_height.max(1) as f32;
    let ratio = (page.width_pt / iw).min(page.height_pt / ih);
    let width = iw * ratio;
    let height = ih * ratio;
    Placement {
        ratio,
        x: (page.width_pt - width) / 2.0,
        y: 0.0,
        width,
        height,
    }
}

pub fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}
