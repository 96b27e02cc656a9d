/// Color thresholds for the map painting convention: near-black pixels are
/// mountains, dark saturated blue is water, near-gray is trees. Anything
/// else (including the green ground color) is background.
const DARK_MAX: u8 = 50;
const BLUE_MIN: u8 = 200;
const GRAY_MIN: u8 = 100;
const GRAY_TOLERANCE: i16 = 30;
const ALPHA_MIN: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLabel {
    Mountain,
    Water,
    Tree,
    Background,
}

/// Classifies a single RGBA sample. Pure function of the one pixel - no
/// neighbor information is consulted, so scan order never matters.
pub fn classify_pixel(r: u8, g: u8, b: u8, a: u8) -> PixelLabel {
    // Mostly-transparent pixels are never features
    if a < ALPHA_MIN {
        return PixelLabel::Background;
    }

    if r < DARK_MAX && g < DARK_MAX && b < DARK_MAX {
        PixelLabel::Mountain
    } else if r < DARK_MAX && g < DARK_MAX && b > BLUE_MIN {
        PixelLabel::Water
    } else if r > GRAY_MIN
        && g > GRAY_MIN
        && b > GRAY_MIN
        && (r as i16 - g as i16).abs() < GRAY_TOLERANCE
        && (g as i16 - b as i16).abs() < GRAY_TOLERANCE
    {
        PixelLabel::Tree
    } else {
        PixelLabel::Background
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_is_mountain() {
        assert_eq!(classify_pixel(0, 0, 0, 255), PixelLabel::Mountain);
        assert_eq!(classify_pixel(49, 49, 49, 255), PixelLabel::Mountain);
    }

    #[test]
    fn test_dark_blue_is_water() {
        assert_eq!(classify_pixel(0, 0, 255, 255), PixelLabel::Water);
        assert_eq!(classify_pixel(49, 49, 201, 255), PixelLabel::Water);
        // Blue channel at the threshold is not water
        assert_eq!(classify_pixel(0, 0, 200, 255), PixelLabel::Background);
    }

    #[test]
    fn test_gray_is_tree() {
        assert_eq!(classify_pixel(128, 128, 128, 255), PixelLabel::Tree);
        assert_eq!(classify_pixel(150, 130, 140, 255), PixelLabel::Tree);
    }

    #[test]
    fn test_unbalanced_gray_is_background() {
        // Channels bright enough but too far apart to read as gray
        assert_eq!(classify_pixel(180, 120, 120, 255), PixelLabel::Background);
        assert_eq!(classify_pixel(120, 120, 180, 255), PixelLabel::Background);
    }

    #[test]
    fn test_ground_green_is_background() {
        assert_eq!(classify_pixel(0, 128, 0, 255), PixelLabel::Background);
    }

    #[test]
    fn test_transparent_is_never_a_feature() {
        assert_eq!(classify_pixel(0, 0, 0, 127), PixelLabel::Background);
        assert_eq!(classify_pixel(0, 0, 255, 0), PixelLabel::Background);
        assert_eq!(classify_pixel(128, 128, 128, 100), PixelLabel::Background);
        // At exactly 128 alpha the pixel counts as opaque
        assert_eq!(classify_pixel(0, 0, 0, 128), PixelLabel::Mountain);
    }

    #[test]
    fn test_mountain_wins_over_water_rule() {
        // All channels dark: mountain rule fires first even though the
        // pixel also fails the water rule's blue check
        assert_eq!(classify_pixel(10, 10, 40, 255), PixelLabel::Mountain);
    }
}
