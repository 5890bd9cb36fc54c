//! Conversion from pointer coordinates into diagram space.
//!
//! The engine never asks a rendering surface where things are; callers hand it
//! a [`CoordinateSpace`] along with each pointer position.

use super::types::Point;

/// Maps a pointer position onto diagram coordinates.
pub trait CoordinateSpace {
	/// Converts `screen` into diagram space.
	fn to_diagram(&self, screen: Point) -> Point;
}

impl<F> CoordinateSpace for F
where
	F: Fn(Point) -> Point,
{
	fn to_diagram(&self, screen: Point) -> Point {
		self(screen)
	}
}

/// Pointer coordinates already are diagram coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Identity;

impl CoordinateSpace for Identity {
	fn to_diagram(&self, screen: Point) -> Point {
		screen
	}
}

/// Client-pixel to canvas-pixel mapping for a canvas whose on-screen box may be
/// offset and scaled by CSS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenTransform {
	/// Client x of the canvas' left edge.
	pub x: f64,
	/// Client y of the canvas' top edge.
	pub y: f64,
	/// Diagram units per client pixel, horizontally.
	pub kx: f64,
	/// Diagram units per client pixel, vertically.
	pub ky: f64,
}

impl ScreenTransform {
	/// Builds the transform from the canvas' bounding client rectangle and its
	/// diagram size. A collapsed rectangle maps 1:1.
	pub fn from_client_rect(
		left: f64,
		top: f64,
		rect_width: f64,
		rect_height: f64,
		width: f64,
		height: f64,
	) -> Self {
		let ratio = |diagram: f64, rect: f64| if rect > 0.0 { diagram / rect } else { 1.0 };
		Self {
			x: left,
			y: top,
			kx: ratio(width, rect_width),
			ky: ratio(height, rect_height),
		}
	}
}

impl CoordinateSpace for ScreenTransform {
	fn to_diagram(&self, screen: Point) -> Point {
		Point::new((screen.x - self.x) * self.kx, (screen.y - self.y) * self.ky)
	}
}

#[cfg(test)]
mod tests {
	use float_cmp::assert_approx_eq;

	use super::*;

	#[test]
	fn offset_canvas_subtracts_origin() {
		let t = ScreenTransform::from_client_rect(40.0, 10.0, 1000.0, 1000.0, 1000.0, 1000.0);
		assert_eq!(t.to_diagram(Point::new(140.0, 60.0)), Point::new(100.0, 50.0));
	}

	#[test]
	fn css_scaled_canvas_rescales() {
		// Canvas of 1000x1000 units displayed at 500x250 CSS pixels.
		let t = ScreenTransform::from_client_rect(0.0, 0.0, 500.0, 250.0, 1000.0, 1000.0);
		let p = t.to_diagram(Point::new(250.0, 125.0));
		assert_approx_eq!(f64, p.x, 500.0);
		assert_approx_eq!(f64, p.y, 500.0);
	}

	#[test]
	fn collapsed_rect_maps_one_to_one() {
		let t = ScreenTransform::from_client_rect(5.0, 5.0, 0.0, 0.0, 800.0, 600.0);
		assert_eq!(t.to_diagram(Point::new(15.0, 25.0)), Point::new(10.0, 20.0));
	}

	#[test]
	fn closures_are_coordinate_spaces() {
		let flip = |p: Point| Point::new(p.y, p.x);
		assert_eq!(flip.to_diagram(Point::new(1.0, 2.0)), Point::new(2.0, 1.0));
		assert_eq!(Identity.to_diagram(Point::new(1.0, 2.0)), Point::new(1.0, 2.0));
	}
}
