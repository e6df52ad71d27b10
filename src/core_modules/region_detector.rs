// THEORY:
// The `RegionDetector` is the engine of the spatial extraction layer. It
// implements binary connected-component analysis over a category mask: every
// maximal 8-connected group of foreground pixels becomes one `Region` with an
// axis-aligned bounding box and a pixel area.
//
// Key architectural principles & algorithm steps:
// 1.  **Seeding by Scan**: The mask is scanned in row-major order; any
//     foreground pixel that has not yet been claimed by a region seeds a new
//     one. A `visited` grid guarantees each pixel is claimed exactly once, so
//     regions are maximal and disjoint by construction.
// 2.  **Region Growing**: From each seed, a breadth-first search expands across
//     all eight neighbors (diagonals included), collecting every reachable
//     foreground pixel into the region.
// 3.  **Data Aggregation**: While a region grows, its bounding box extremes and
//     pixel count are folded in on the fly; no second pass over the pixels is
//     needed.
// 4.  **Area Filtering**: `filter_regions` drops regions whose area does not
//     exceed the minimum — the boundary is strict (`area > min_area`), so a
//     region of exactly the threshold size is discarded.
// 5.  **Stateless Utility**: The detector takes one mask and produces the
//     regions for that mask. It has no memory of previous frames, and the order
//     of the returned regions is an implementation detail callers must not
//     rely on.

use crate::core_modules::segmenter::Mask;

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A maximal 8-connected foreground region within a single mask.
/// Ephemeral: computed, filtered, and discarded within the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// The rectangle enclosing every pixel of the region.
    pub bounding_box: BoundingBox,
    /// The number of foreground pixels in the region.
    pub area: usize,
}

pub mod region_detector {
    use super::*;

    /// Finds all maximal 8-connected foreground regions in a mask.
    pub fn find_regions(mask: &Mask) -> Vec<Region> {
        let width = mask.width() as usize;
        let height = mask.height() as usize;
        let mut visited = vec![false; width * height];
        let mut regions = Vec::new();

        for y in 0..height {
            for x in 0..width {
                let index = y * width + x;
                if visited[index] || !mask.is_foreground(x as u32, y as u32) {
                    continue;
                }
                visited[index] = true;
                regions.push(grow_region(x, y, mask, &mut visited));
            }
        }

        regions
    }

    /// Keeps only regions whose area strictly exceeds `min_area`.
    pub fn filter_regions(regions: Vec<Region>, min_area: usize) -> Vec<Region> {
        regions.into_iter().filter(|r| r.area > min_area).collect()
    }

    /// Grows one region from a seed pixel via breadth-first search, folding in
    /// the bounding-box extremes and pixel count as it goes.
    fn grow_region(seed_x: usize, seed_y: usize, mask: &Mask, visited: &mut [bool]) -> Region {
        let width = mask.width() as i64;
        let height = mask.height() as i64;

        let mut queue = vec![(seed_x, seed_y)];
        let mut min_x = seed_x;
        let mut min_y = seed_y;
        let mut max_x = seed_x;
        let mut max_y = seed_y;
        let mut area = 0usize;

        while let Some((x, y)) = queue.pop() {
            area += 1;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);

            // All eight neighbors, diagonals included.
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || nx >= width || ny < 0 || ny >= height {
                        continue;
                    }
                    let neighbor = (ny * width + nx) as usize;
                    if !visited[neighbor] && mask.is_foreground(nx as u32, ny as u32) {
                        visited[neighbor] = true;
                        queue.push((nx as usize, ny as usize));
                    }
                }
            }
        }

        Region {
            bounding_box: BoundingBox {
                x: min_x as u32,
                y: min_y as u32,
                width: (max_x - min_x + 1) as u32,
                height: (max_y - min_y + 1) as u32,
            },
            area,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::region_detector::{filter_regions, find_regions};
    use super::*;

    #[test]
    fn empty_mask_yields_no_regions() {
        let mask = Mask::from_rows(&[&[0, 0, 0], &[0, 0, 0]]);
        assert!(find_regions(&mask).is_empty());
    }

    #[test]
    fn single_block_has_exact_bounding_box_and_area() {
        let mask = Mask::from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let regions = find_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(
            regions[0],
            Region {
                bounding_box: BoundingBox {
                    x: 1,
                    y: 1,
                    width: 3,
                    height: 2,
                },
                area: 6,
            }
        );
    }

    #[test]
    fn diagonal_pixels_join_into_one_region() {
        let mask = Mask::from_rows(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        let regions = find_regions(&mask);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 3);
        assert_eq!(
            regions[0].bounding_box,
            BoundingBox {
                x: 0,
                y: 0,
                width: 3,
                height: 3,
            }
        );
    }

    #[test]
    fn separated_blocks_form_distinct_regions() {
        let mask = Mask::from_rows(&[&[1, 1, 0, 0, 1], &[1, 1, 0, 0, 1], &[0, 0, 0, 0, 0]]);
        let mut regions = find_regions(&mask);
        regions.sort_by_key(|r| r.bounding_box.x);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].area, 4);
        assert_eq!(regions[1].area, 2);
    }

    #[test]
    fn area_filter_boundary_is_strict() {
        let at_threshold = Region {
            bounding_box: BoundingBox {
                x: 0,
                y: 0,
                width: 20,
                height: 10,
            },
            area: 200,
        };
        let above_threshold = Region {
            area: 201,
            ..at_threshold
        };
        let kept = filter_regions(vec![at_threshold, above_threshold], 200);
        assert_eq!(kept, vec![above_threshold]);
    }
}
