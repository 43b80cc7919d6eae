//! The color wheel shared by the rainbow animations.

use schoolbag_hardware::Rgb;

/// Map a wheel position to a color.
///
/// The wheel runs red → green → blue and back in three segments of 85
/// positions. Neighbouring positions differ by at most 3 per channel,
/// including across the wrap from 255 to 0.
pub fn wheel(pos: u8) -> Rgb {
    match pos {
        0..85 => Rgb::new(pos * 3, 255 - pos * 3, 0),
        85..170 => {
            let p = pos - 85;
            Rgb::new(255 - p * 3, 0, p * 3)
        }
        _ => {
            let p = pos - 170;
            Rgb::new(0, p * 3, 255 - p * 3)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn distance(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[rstest]
    #[case(0, Rgb::new(0, 255, 0))]
    #[case(1, Rgb::new(3, 252, 0))]
    #[case(85, Rgb::new(255, 0, 0))]
    #[case(170, Rgb::new(0, 0, 255))]
    #[case(255, Rgb::new(0, 255, 0))]
    fn test_wheel_anchors(#[case] pos: u8, #[case] expected: Rgb) {
        assert_eq!(wheel(pos), expected);
    }

    #[test]
    fn test_wheel_wraps_without_discontinuity() {
        assert_eq!(wheel(0), wheel(((256usize) % 256) as u8));
        assert!(distance(wheel(255), wheel(0)) <= 3);
    }

    #[test]
    fn test_wheel_is_continuous() {
        for pos in 0..=254u8 {
            assert!(
                distance(wheel(pos), wheel(pos + 1)) <= 3,
                "jump between {pos} and {}",
                pos + 1
            );
        }
    }
}
