use serde::Serialize;

/// Collapse fraction below which the header border stays invisible
const BORDER_FADE_START: f64 = 0.8;

/// Opacities the host applies to the header each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderOpacity {
    /// Bottom border of the shell, fades in over the last 20% of the collapse
    pub border: f64,
    /// Reveal bar content, fully opaque when shown
    pub content: f64,
}

/// How far the bar has collapsed, 0.0 (shown) to 1.0 (hidden)
#[inline]
pub fn collapse_progress(offset: f64, slide_range: f64) -> f64 {
    if slide_range <= 0.0 {
        return 0.0;
    }
    (offset.abs() / slide_range).clamp(0.0, 1.0)
}

pub fn derive_opacity(offset: f64, slide_range: f64) -> HeaderOpacity {
    let p = collapse_progress(offset, slide_range);

    let border = if p < BORDER_FADE_START {
        0.0
    } else {
        ((p - BORDER_FADE_START) / (1.0 - BORDER_FADE_START))
            .powi(3)
            .clamp(0.0, 1.0)
    };
    let content = (1.0 - p).powi(2).max(0.0);

    HeaderOpacity { border, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_shown_header() {
        let o = derive_opacity(0.0, 60.0);
        assert_eq!(o.border, 0.0);
        assert_eq!(o.content, 1.0);
    }

    #[test]
    fn test_hidden_header() {
        let o = derive_opacity(-60.0, 60.0);
        assert!(approx(o.border, 1.0));
        assert_eq!(o.content, 0.0);
    }

    #[test]
    fn test_border_invisible_until_eighty_percent() {
        assert_eq!(derive_opacity(-47.9, 60.0).border, 0.0);
        assert_eq!(derive_opacity(-48.0, 60.0).border, 0.0);
        // p = 0.9 -> (0.1 / 0.2)^3
        assert!(approx(derive_opacity(-54.0, 60.0).border, 0.125));
    }

    #[test]
    fn test_content_quadratic_fade() {
        // p = 0.5 -> 0.25
        assert!(approx(derive_opacity(-40.0, 80.0).content, 0.25));
        assert!(approx(derive_opacity(-20.0, 80.0).content, 0.5625));
    }

    #[test]
    fn test_degenerate_range() {
        let o = derive_opacity(-10.0, 0.0);
        assert_eq!(o.border, 0.0);
        assert_eq!(o.content, 1.0);
    }
}
