//! Seek geometry properties across pointer positions and viewport widths

use vtplayer_core::*;

#[test]
fn test_percentage_always_within_bounds() {
    let widths = [1.0, 27.5, 100.0, 640.0, 1000.0, 1920.0, 7680.0];
    for width in widths {
        let mut x = -200.0;
        while x <= width + 200.0 {
            let percentage = percentage_from_pointer_x(x, width);
            assert!(
                (0.0..=100.0).contains(&percentage),
                "x={} width={} gave {}",
                x,
                width,
                percentage
            );
            x += 7.3;
        }
    }
}

#[test]
fn test_percentage_is_monotonic_in_pointer_x() {
    let width = 1280.0;
    let mut previous = 0.0;
    for step in 0..=1400 {
        let percentage = percentage_from_pointer_x(step as f64, width);
        assert!(percentage >= previous);
        previous = percentage;
    }
}
