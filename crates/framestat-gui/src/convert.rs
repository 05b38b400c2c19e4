use framestat_core::grid::{PixelGrid, SourceImage};

/// Convert an 8-bit grid to a gray egui ColorImage.
pub fn grid_to_color_image(grid: &PixelGrid) -> egui::ColorImage {
    let (w, h) = grid.dims();
    let pixels = grid
        .data
        .iter()
        .map(|&v| egui::Color32::from_gray(v))
        .collect();

    egui::ColorImage {
        size: [w, h],
        pixels,
        source_size: Default::default(),
    }
}

/// Convert a decoded image, keeping color when the file has it.
pub fn source_to_color_image(image: &SourceImage) -> egui::ColorImage {
    match image {
        SourceImage::Gray(grid) => grid_to_color_image(grid),
        SourceImage::Color(color) => {
            let (w, h) = color.red.dims();
            let pixels = color
                .red
                .data
                .iter()
                .zip(color.green.data.iter())
                .zip(color.blue.data.iter())
                .map(|((&r, &g), &b)| egui::Color32::from_rgb(r, g, b))
                .collect();
            egui::ColorImage {
                size: [w, h],
                pixels,
                source_size: Default::default(),
            }
        }
    }
}
