//! Adaptive octree over photon samples.
//!
//! Cells live in a flat arena and refer to each other by index, so the
//! whole hierarchy is freed in one pass when the map is dropped. Photons
//! are likewise referenced by index into a single owned list.

use std::collections::VecDeque;

use lumen_math::{Aabb, Vec3};

use crate::photon::Photon;

/// One node of the photon map octree: an axis-aligned box holding photon
/// references, possibly subdivided into eight children.
#[derive(Debug, Clone)]
pub struct Cell {
    /// Bounds of this cell; always one of the eight equal octants of the
    /// parent's bounds (the root's bounds equal the scene volume).
    pub bounds: Aabb,
    parent: Option<usize>,
    children: Option<[usize; 8]>,
    photons: Vec<u32>,
}

impl Cell {
    /// A cell with no children is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Indices into the map's photon list for every photon whose position
    /// lies within this cell's bounds.
    pub fn photon_indices(&self) -> &[u32] {
        &self.photons
    }

    /// Arena index of the parent cell, if any.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
}

/// Spatial index over a flat list of photons.
///
/// Built once before rendering starts and read-only afterwards, so it can
/// be queried from parallel pixel loops without synchronization.
pub struct PhotonMap {
    photons: Vec<Photon>,
    cells: Vec<Cell>,
}

impl PhotonMap {
    /// Build the octree over `photons` within the scene volume `bounds`.
    ///
    /// Cells are processed breadth-first. A cell is split into eight
    /// octants when it holds at least `max_photons_per_cell` references or
    /// when any of its extents reaches `max_cell_extent`; the size rule
    /// keeps splitting even through empty cells, and terminates because
    /// every split halves every extent. Each child takes the subset of the
    /// parent's references inside its bounds, tested inclusively on all six
    /// planes, so a photon sitting exactly on a shared plane ends up in
    /// every matching sibling. Parents keep their reference lists after
    /// splitting; only leaf lists are consulted by queries.
    pub fn build(
        bounds: Aabb,
        photons: Vec<Photon>,
        max_photons_per_cell: usize,
        max_cell_extent: f32,
    ) -> Self {
        let root = Cell {
            bounds,
            parent: None,
            children: None,
            photons: (0..photons.len() as u32).collect(),
        };
        let mut cells = vec![root];

        let mut queue = VecDeque::from([0usize]);
        while let Some(current) = queue.pop_front() {
            let size = cells[current].bounds.size();
            let split = cells[current].photons.len() >= max_photons_per_cell
                || size.x >= max_cell_extent
                || size.y >= max_cell_extent
                || size.z >= max_cell_extent;
            if !split {
                continue;
            }

            let octants = cells[current].bounds.octants();
            let subsets = octants.map(|octant| {
                cells[current]
                    .photons
                    .iter()
                    .copied()
                    .filter(|&p| octant.contains(photons[p as usize].position))
                    .collect::<Vec<u32>>()
            });

            let mut children = [0usize; 8];
            for (i, (octant, subset)) in octants.into_iter().zip(subsets).enumerate() {
                let child = cells.len();
                cells.push(Cell {
                    bounds: octant,
                    parent: Some(current),
                    children: None,
                    photons: subset,
                });
                children[i] = child;
                queue.push_back(child);
            }
            cells[current].children = Some(children);
        }

        let map = Self { photons, cells };
        log::info!(
            "photon map built: {} photons, {} cells, depth {}",
            map.photons.len(),
            map.cells.len(),
            map.depth()
        );
        map
    }

    /// All photons owned by the map.
    pub fn photons(&self) -> &[Photon] {
        &self.photons
    }

    /// The root cell; its bounds are the scene volume.
    pub fn root(&self) -> &Cell {
        &self.cells[0]
    }

    /// Total number of cells in the arena, leaves and interior alike.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of levels in the tree (1 for a lone root).
    pub fn depth(&self) -> usize {
        // Parents always precede children in the arena, so a single
        // forward scan resolves every cell's level.
        let mut levels = vec![1usize; self.cells.len()];
        let mut depth = 1;
        for i in 0..self.cells.len() {
            if let Some(parent) = self.cells[i].parent {
                levels[i] = levels[parent] + 1;
                depth = depth.max(levels[i]);
            }
        }
        depth
    }

    /// Iterate over every leaf cell.
    pub fn leaves(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.is_leaf())
    }

    /// Descend to the leaf whose chain of cell centers is closest to
    /// `point`.
    ///
    /// At each level the child with minimum squared center distance wins,
    /// ties going to the first child in enumeration order. This is a
    /// heuristic: the returned leaf is not guaranteed to contain `point`,
    /// nor to be the globally nearest leaf, and the query never fails even
    /// for points outside the root's bounds.
    pub fn nearest_cell(&self, point: Vec3) -> &Cell {
        let mut best = 0usize;
        while let Some(children) = self.cells[best].children {
            let mut closest_distance = f32::MAX;
            let mut closest = children[0];
            for child in children {
                let distance = self.cells[child].bounds.center().distance_squared(point);
                if distance < closest_distance {
                    closest_distance = distance;
                    closest = child;
                }
            }
            best = closest;
        }
        &self.cells[best]
    }

    /// The photons referenced by `nearest_cell(point)`.
    ///
    /// This is the lookup the scene's integrators and the visualization
    /// render mode consume.
    pub fn photons_at(&self, point: Vec3) -> impl Iterator<Item = &Photon> {
        self.cell_photons(self.nearest_cell(point))
    }

    /// Resolve a cell's photon references against the owned photon list.
    pub fn cell_photons<'a>(&'a self, cell: &'a Cell) -> impl Iterator<Item = &'a Photon> {
        cell.photons.iter().map(|&p| &self.photons[p as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn scatter_photons(n: usize, lo: f32, hi: f32, seed: u64) -> Vec<Photon> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let p = Vec3::new(
                    rng.gen_range(lo..hi),
                    rng.gen_range(lo..hi),
                    rng.gen_range(lo..hi),
                );
                Photon::new(p, Vec3::ONE)
            })
            .collect()
    }

    #[test]
    fn test_build_leaf_property() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let photons = scatter_photons(200, 0.0, 10.0, 7);
        let map = PhotonMap::build(bounds, photons, 4, 2.5);

        // A leaf is a cell the split condition rejected: fewer references
        // than the cap and every extent under the cap.
        for leaf in map.leaves() {
            assert!(leaf.photon_indices().len() < 4);
            let size = leaf.bounds.size();
            assert!(size.x < 2.5 && size.y < 2.5 && size.z < 2.5);
        }
    }

    #[test]
    fn test_interior_photon_lands_in_exactly_one_leaf() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let photons = vec![Photon::new(Vec3::new(2.5, 2.5, 2.5), Vec3::ONE)];
        // One photon under the count cap; the size rule alone forces a
        // single level of subdivision.
        let map = PhotonMap::build(bounds, photons, 2, 6.0);

        let owners = map
            .leaves()
            .filter(|leaf| !leaf.photon_indices().is_empty())
            .count();
        assert_eq!(owners, 1);
    }

    #[test]
    fn test_boundary_photon_is_shared_by_siblings() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        // x = 5.0 sits exactly on the splitting plane between the x-low
        // and x-high octants; y and z are strictly inside their halves.
        let photons = vec![Photon::new(Vec3::new(5.0, 2.5, 2.5), Vec3::ONE)];
        let map = PhotonMap::build(bounds, photons, 2, 6.0);

        let owners = map
            .leaves()
            .filter(|leaf| !leaf.photon_indices().is_empty())
            .count();
        assert_eq!(owners, 2);
    }

    #[test]
    fn test_parent_retains_references_after_split() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let photons = scatter_photons(50, 0.0, 10.0, 11);
        let map = PhotonMap::build(bounds, photons, 8, 20.0);

        assert!(!map.root().is_leaf());
        assert_eq!(map.root().photon_indices().len(), 50);
    }

    #[test]
    fn test_nearest_cell_always_returns_a_leaf() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let photons = scatter_photons(100, 0.0, 10.0, 3);
        let map = PhotonMap::build(bounds, photons, 4, 3.0);

        for point in [
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 10.0),
            Vec3::new(100.0, -50.0, 3.0),
            Vec3::new(-1e6, 1e6, 0.0),
        ] {
            assert!(map.nearest_cell(point).is_leaf());
        }
    }

    #[test]
    fn test_nearest_cell_descends_toward_query() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let map = PhotonMap::build(bounds, Vec::new(), 8, 6.0);

        // One level of subdivision; a point well inside an octant is
        // closest to that octant's center at every step.
        let point = Vec3::new(9.0, 9.0, 9.0);
        assert!(map.nearest_cell(point).bounds.contains(point));

        let point = Vec3::new(1.0, 1.0, 8.0);
        assert!(map.nearest_cell(point).bounds.contains(point));
    }

    #[test]
    fn test_depth_bounded_by_size_rule() {
        // Extents 8, cap 1.5: the size rule stops after halving three
        // times (8 -> 4 -> 2 -> 1), so there are at most
        // ceil(log2(8 / 1.5)) = 3 levels below the root.
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(8.0));
        let map = PhotonMap::build(bounds, Vec::new(), 8, 1.5);

        assert!(map.depth() <= 4);
        for leaf in map.leaves() {
            assert!(leaf.bounds.max_extent() < 1.5);
        }
    }

    #[test]
    fn test_photons_at_resolves_leaf_references() {
        let bounds = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        let photons = vec![
            Photon::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0)),
            Photon::new(Vec3::new(1.2, 0.8, 1.1), Vec3::new(0.0, 1.0, 0.0)),
            Photon::new(Vec3::new(9.0, 9.0, 9.0), Vec3::new(0.0, 0.0, 1.0)),
        ];
        let map = PhotonMap::build(bounds, photons, 8, 6.0);

        let total: Vec3 = map.photons_at(Vec3::new(1.0, 1.0, 1.0)).map(|p| p.power).sum();
        assert_eq!(total, Vec3::new(1.0, 1.0, 0.0));
    }
}
