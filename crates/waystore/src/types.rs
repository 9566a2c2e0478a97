use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A point in a zone's coordinate space plus view orientation.
///
/// Coordinates are double precision; yaw and pitch are single precision,
/// matching the on-disk column types. No bounds beyond IEEE-754
/// representability are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self { x, y, z, yaw, pitch }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}) facing yaw {} pitch {}",
            self.x, self.y, self.z, self.yaw, self.pitch
        )
    }
}

/// A stored last position for one (user, zone) pair.
///
/// Whether `zone` still names a live zone in the hosting environment is the
/// caller's concern; this is exactly what the row holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub user_id: Uuid,
    pub zone: String,
    pub position: Position,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        let position = Position::new(10.5, 64.0, -3.25, 90.0, 0.0);
        let rendered = position.to_string();
        assert!(rendered.contains("10.5"));
        assert!(rendered.contains("-3.25"));
        assert!(rendered.contains("yaw 90"));
    }
}
