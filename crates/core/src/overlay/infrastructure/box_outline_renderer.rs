use crate::overlay::domain::region_renderer::RegionRenderer;
use crate::shared::constants::BOX_STROKE_WIDTH;
use crate::shared::frame::Frame;
use crate::shared::region::Region;

/// CPU renderer painting rectangle outlines directly on the pixel buffer.
///
/// The stroke lies entirely inside the (clamped) region, so pixels outside
/// the rectangle are never touched. Regions extending past the frame edges
/// are clipped instead of rejected.
pub struct BoxOutlineRenderer {
    stroke: u32,
}

impl BoxOutlineRenderer {
    pub fn new(stroke: u32) -> Self {
        Self { stroke }
    }
}

impl Default for BoxOutlineRenderer {
    fn default() -> Self {
        Self::new(BOX_STROKE_WIDTH)
    }
}

impl RegionRenderer for BoxOutlineRenderer {
    fn draw(
        &self,
        frame: &mut Frame,
        regions: &[Region],
        color: [u8; 3],
    ) -> Result<(), Box<dyn std::error::Error>> {
        if frame.channels() != 3 {
            return Err(format!(
                "outline renderer expects 3 channels, got {}",
                frame.channels()
            )
            .into());
        }

        let (fw, fh) = (frame.width(), frame.height());
        let stroke = self.stroke as i32;
        let mut pixels = frame.as_ndarray_mut();

        for region in regions {
            let Some(r) = region.clamped(fw, fh) else {
                continue;
            };
            let (x0, y0) = (r.x, r.y);
            let (x1, y1) = (r.x + r.width, r.y + r.height); // exclusive

            // Four stroke bands; the corners overlap, which is harmless.
            let bands = [
                (x0..x1, y0..(y0 + stroke).min(y1)),
                (x0..x1, (y1 - stroke).max(y0)..y1),
                (x0..(x0 + stroke).min(x1), y0..y1),
                ((x1 - stroke).max(x0)..x1, y0..y1),
            ];
            for (xs, ys) in bands {
                for y in ys {
                    for x in xs.clone() {
                        for (c, &v) in color.iter().enumerate() {
                            pixels[[y as usize, x as usize, c]] = v;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_frame(width: u32, height: u32) -> Frame {
        Frame::new(vec![0u8; (width * height * 3) as usize], width, height, 3, 0)
    }

    fn pixel(frame: &Frame, x: usize, y: usize) -> [u8; 3] {
        let arr = frame.as_ndarray();
        [arr[[y, x, 0]], arr[[y, x, 1]], arr[[y, x, 2]]]
    }

    const COLOR: [u8; 3] = [9, 8, 7];

    #[test]
    fn test_border_is_painted_with_requested_color() {
        let mut frame = black_frame(10, 10);
        let region = Region {
            x: 2,
            y: 2,
            width: 6,
            height: 6,
        };
        BoxOutlineRenderer::new(2)
            .draw(&mut frame, &[region], COLOR)
            .unwrap();

        // Outer border row/column and the second stroke row
        assert_eq!(pixel(&frame, 2, 2), COLOR);
        assert_eq!(pixel(&frame, 7, 7), COLOR);
        assert_eq!(pixel(&frame, 3, 4), COLOR);
        assert_eq!(pixel(&frame, 5, 6), COLOR);
    }

    #[test]
    fn test_interior_and_outside_are_untouched() {
        let mut frame = black_frame(10, 10);
        let region = Region {
            x: 2,
            y: 2,
            width: 6,
            height: 6,
        };
        BoxOutlineRenderer::new(2)
            .draw(&mut frame, &[region], COLOR)
            .unwrap();

        assert_eq!(pixel(&frame, 4, 4), [0, 0, 0]); // interior
        assert_eq!(pixel(&frame, 5, 5), [0, 0, 0]);
        assert_eq!(pixel(&frame, 0, 0), [0, 0, 0]); // outside
        assert_eq!(pixel(&frame, 9, 5), [0, 0, 0]);
    }

    #[test]
    fn test_no_regions_leaves_frame_unchanged() {
        let mut frame = black_frame(6, 6);
        let before = frame.data().to_vec();
        BoxOutlineRenderer::default()
            .draw(&mut frame, &[], COLOR)
            .unwrap();
        assert_eq!(frame.data(), &before[..]);
    }

    #[test]
    fn test_region_overhanging_the_frame_is_clipped() {
        let mut frame = black_frame(8, 8);
        let region = Region {
            x: -4,
            y: -4,
            width: 8,
            height: 8,
        };
        BoxOutlineRenderer::new(1)
            .draw(&mut frame, &[region], COLOR)
            .unwrap();
        // Clamps to (0,0)-(4,4); its right/bottom edges are painted.
        assert_eq!(pixel(&frame, 3, 1), COLOR);
        assert_eq!(pixel(&frame, 1, 3), COLOR);
        assert_eq!(pixel(&frame, 5, 5), [0, 0, 0]);
    }

    #[test]
    fn test_region_fully_outside_is_ignored() {
        let mut frame = black_frame(8, 8);
        let before = frame.data().to_vec();
        let region = Region {
            x: 100,
            y: 100,
            width: 10,
            height: 10,
        };
        BoxOutlineRenderer::default()
            .draw(&mut frame, &[region], COLOR)
            .unwrap();
        assert_eq!(frame.data(), &before[..]);
    }

    #[test]
    fn test_stroke_wider_than_region_fills_it() {
        let mut frame = black_frame(8, 8);
        let region = Region {
            x: 3,
            y: 3,
            width: 2,
            height: 2,
        };
        BoxOutlineRenderer::new(4)
            .draw(&mut frame, &[region], COLOR)
            .unwrap();
        assert_eq!(pixel(&frame, 3, 3), COLOR);
        assert_eq!(pixel(&frame, 4, 4), COLOR);
        assert_eq!(pixel(&frame, 5, 5), [0, 0, 0]);
    }

    #[test]
    fn test_single_channel_frame_is_rejected() {
        let mut frame = Frame::new(vec![0u8; 16], 4, 4, 1, 0);
        let err = BoxOutlineRenderer::default()
            .draw(&mut frame, &[], COLOR)
            .unwrap_err();
        assert!(err.to_string().contains("expects 3 channels"));
    }
}
