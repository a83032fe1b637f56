use serde::{Deserialize, Serialize};

/// Dead-zone fraction of the radius while navigating.
pub const NAV_DEADZONE: f32 = 0.15;

/// Dead-zone fraction while a selection gesture is active. Wider, so the
/// coarse clockwise/counterclockwise expansion is harder to trip by
/// accident.
pub const SELECTION_DEADZONE: f32 = 0.30;

/// The eight joystick sectors, 45° each, centered on the compass directions.
///
/// Offsets use screen conventions: x grows rightwards, y grows downwards, so
/// `Down` is a positive-y deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    Up,
    UpRight,
}

/// Classify a joystick deflection `(x, y)` against a stick of the given
/// radius.
///
/// The offset magnitude is clamped to the radius (direction preserved);
/// anything below `deadzone * radius` is neutral (`None`). Sector boundaries
/// sit at ±22.5°, ±67.5°, ±112.5° and ±157.5°.
pub fn classify(x: f32, y: f32, radius: f32, deadzone: f32) -> Option<Direction> {
    let magnitude = (x * x + y * y).sqrt().min(radius);
    if magnitude < deadzone * radius {
        return None;
    }
    Some(direction_for_angle(angle_deg(x, y)))
}

/// Deflection angle in degrees in `(-180, 180]`: 0 points right, positive
/// angles point into the lower half-plane (y down).
pub(crate) fn angle_deg(x: f32, y: f32) -> f32 {
    y.atan2(x).to_degrees()
}

fn direction_for_angle(deg: f32) -> Direction {
    match deg {
        d if (-22.5..22.5).contains(&d) => Direction::Right,
        d if (22.5..67.5).contains(&d) => Direction::DownRight,
        d if (67.5..112.5).contains(&d) => Direction::Down,
        d if (112.5..157.5).contains(&d) => Direction::DownLeft,
        d if (-67.5..-22.5).contains(&d) => Direction::UpRight,
        d if (-112.5..-67.5).contains(&d) => Direction::Up,
        d if (-157.5..-112.5).contains(&d) => Direction::UpLeft,
        _ => Direction::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RADIUS: f32 = 100.0;

    #[rstest]
    #[case(100.0, 0.0, Direction::Right)]
    #[case(70.0, 70.0, Direction::DownRight)]
    #[case(0.0, 100.0, Direction::Down)]
    #[case(-70.0, 70.0, Direction::DownLeft)]
    #[case(-100.0, 0.0, Direction::Left)]
    #[case(-70.0, -70.0, Direction::UpLeft)]
    #[case(0.0, -100.0, Direction::Up)]
    #[case(70.0, -70.0, Direction::UpRight)]
    fn test_sector_centers(#[case] x: f32, #[case] y: f32, #[case] expected: Direction) {
        assert_eq!(classify(x, y, RADIUS, NAV_DEADZONE), Some(expected));
    }

    #[rstest]
    // Just inside each boundary of the Right sector.
    #[case(22.4, Direction::Right)]
    #[case(-22.4, Direction::Right)]
    // Just across.
    #[case(22.6, Direction::DownRight)]
    #[case(-22.6, Direction::UpRight)]
    #[case(67.6, Direction::Down)]
    #[case(112.6, Direction::DownLeft)]
    #[case(157.6, Direction::Left)]
    #[case(-157.6, Direction::Left)]
    #[case(-112.6, Direction::UpLeft)]
    #[case(-67.6, Direction::Up)]
    fn test_sector_boundaries(#[case] angle_deg: f32, #[case] expected: Direction) {
        let rad = angle_deg.to_radians();
        let (x, y) = (RADIUS * rad.cos(), RADIUS * rad.sin());
        assert_eq!(classify(x, y, RADIUS, NAV_DEADZONE), Some(expected));
    }

    #[test]
    fn test_neutral_below_nav_deadzone() {
        assert_eq!(classify(14.0, 0.0, RADIUS, NAV_DEADZONE), None);
        assert_eq!(classify(16.0, 0.0, RADIUS, NAV_DEADZONE), Some(Direction::Right));
    }

    #[test]
    fn test_selection_deadzone_is_wider() {
        // The same deflection that navigates is still neutral while a
        // selection gesture is active.
        assert_eq!(classify(20.0, 0.0, RADIUS, NAV_DEADZONE), Some(Direction::Right));
        assert_eq!(classify(20.0, 0.0, RADIUS, SELECTION_DEADZONE), None);
        assert_eq!(
            classify(31.0, 0.0, RADIUS, SELECTION_DEADZONE),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_magnitude_beyond_radius_keeps_direction() {
        assert_eq!(
            classify(5000.0, -5000.0, RADIUS, NAV_DEADZONE),
            Some(Direction::UpRight)
        );
    }

    #[test]
    fn test_zero_offset_is_neutral() {
        assert_eq!(classify(0.0, 0.0, RADIUS, NAV_DEADZONE), None);
    }
}
