//! Map viewport state and slippy-map maths
//!
//! The terminal map is a grid of cells around a fixed centre. A cell is
//! treated as an 8x16 pixel block of a 256px Web Mercator tile, which is
//! enough to turn a cursor position into a geographic coordinate.

use super::draft::Position;
use std::f64::consts::PI;

/// Tile edge length in pixels
const TILE_SIZE: f64 = 256.0;
/// Horizontal pixels covered by one terminal cell
const CELL_WIDTH_PX: f64 = 8.0;
/// Vertical pixels covered by one terminal cell
const CELL_HEIGHT_PX: f64 = 16.0;
/// Highest zoom level accepted by tile servers
const MAX_ZOOM: u8 = 22;

/// Map centred on the registration page
pub const CREATE_MAP_CENTER: Position = Position {
    latitude: -19.9135286,
    longitude: -43.9653568,
};

/// Map centred on the landing page
pub const LANDING_MAP_CENTER: Position = Position {
    latitude: -19.9154676,
    longitude: -43.9619687,
};

/// Zoom level used by both maps
pub const DEFAULT_ZOOM: u8 = 15;

/// A visible map region with a movable cursor
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewport {
    pub center: Position,
    pub zoom: u8,
    /// Cursor offset from the centre, in cells (x right, y down)
    pub cursor: (i32, i32),
}

impl MapViewport {
    pub fn new(center: Position, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
            cursor: (0, 0),
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * f64::from(1u32 << self.zoom)
    }

    /// Project a coordinate to world pixel space at the current zoom
    fn to_pixels(&self, position: Position) -> (f64, f64) {
        let size = self.world_size();
        let x = (position.longitude + 180.0) / 360.0 * size;
        let lat_rad = position.latitude.to_radians();
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * size;
        (x, y)
    }

    fn from_pixels(&self, x: f64, y: f64) -> Position {
        let size = self.world_size();
        let longitude = x / size * 360.0 - 180.0;
        let latitude = (PI * (1.0 - 2.0 * y / size)).sinh().atan().to_degrees();
        Position::new(latitude, longitude)
    }

    /// Coordinate under the cell at `(dx, dy)` cells from the centre
    pub fn coordinate_at(&self, dx: i32, dy: i32) -> Position {
        let (cx, cy) = self.to_pixels(self.center);
        self.from_pixels(
            cx + f64::from(dx) * CELL_WIDTH_PX,
            cy + f64::from(dy) * CELL_HEIGHT_PX,
        )
    }

    /// Coordinate under the cursor
    pub fn cursor_coordinate(&self) -> Position {
        self.coordinate_at(self.cursor.0, self.cursor.1)
    }

    /// Offset of a coordinate from the centre, in fractional cells
    pub fn cell_offset(&self, position: Position) -> (f64, f64) {
        let (cx, cy) = self.to_pixels(self.center);
        let (px, py) = self.to_pixels(position);
        ((px - cx) / CELL_WIDTH_PX, (py - cy) / CELL_HEIGHT_PX)
    }

    /// Move the cursor, keeping it within `half_width` x `half_height` cells
    pub fn move_cursor(&mut self, dx: i32, dy: i32, half_width: i32, half_height: i32) {
        self.cursor.0 = (self.cursor.0 + dx).clamp(-half_width, half_width);
        self.cursor.1 = (self.cursor.1 + dy).clamp(-half_height, half_height);
    }

    /// Tile indices `(x, y)` containing the centre
    pub fn center_tile(&self) -> (i64, i64) {
        let n = 1_i64 << self.zoom;
        let (px, py) = self.to_pixels(self.center);
        let x_raw = (px / TILE_SIZE).floor() as i64;
        let y_raw = (py / TILE_SIZE).floor() as i64;
        (((x_raw % n) + n) % n, y_raw.clamp(0, n - 1))
    }

    /// Resolve a `{z}/{x}/{y}` tile template for the centre tile
    pub fn tile_url(&self, template: &str, access_token: &str) -> String {
        let (x, y) = self.center_tile();
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{access_token}", access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_centre_cell_is_centre_coordinate() {
        let map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        let pos = map.coordinate_at(0, 0);
        assert!(close(pos.latitude, CREATE_MAP_CENTER.latitude));
        assert!(close(pos.longitude, CREATE_MAP_CENTER.longitude));
    }

    #[test]
    fn test_moving_right_increases_longitude() {
        let map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        let east = map.coordinate_at(3, 0);
        assert!(east.longitude > CREATE_MAP_CENTER.longitude);
    }

    #[test]
    fn test_moving_down_decreases_latitude() {
        let map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        let south = map.coordinate_at(0, 3);
        assert!(south.latitude < CREATE_MAP_CENTER.latitude);
    }

    #[test]
    fn test_cell_offset_inverts_coordinate_at() {
        let map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        let pos = map.coordinate_at(-7, 4);
        let (dx, dy) = map.cell_offset(pos);
        assert!((dx + 7.0).abs() < 1e-6);
        assert!((dy - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_move_cursor_clamps() {
        let mut map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        map.move_cursor(50, -50, 10, 5);
        assert_eq!(map.cursor, (10, -5));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let map = MapViewport::new(CREATE_MAP_CENTER, 40);
        assert_eq!(map.zoom, 22);
    }

    #[test]
    fn test_tile_url_resolves_placeholders() {
        let map = MapViewport::new(Position::new(0.0, 0.0), 1);
        let url = map.tile_url("https://tiles/{z}/{x}/{y}.png?t={access_token}", "abc");
        assert_eq!(url, "https://tiles/1/1/1.png?t=abc");
    }

    #[test]
    fn test_center_tile_for_belo_horizonte() {
        let map = MapViewport::new(CREATE_MAP_CENTER, DEFAULT_ZOOM);
        let (x, y) = map.center_tile();
        assert_eq!((x, y), (12382, 18234));
    }
}
