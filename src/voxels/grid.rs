use glam::IVec3;

use crate::bounds::IAabb;

use super::BlockKind;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub kind: BlockKind,
    /// Back-reference owned by the renderer. Never read by the core.
    pub instance: Option<u32>,
}

const NEIGHBORS: [IVec3; 6] = [
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Z,
    IVec3::NEG_Z,
];

/// Dense `width x total_height x width` block container.
#[derive(Clone, Debug)]
pub struct VoxelGrid {
    width: usize,
    total_height: usize,
    cells: Vec<Cell>, // owned, flattened (x, y, z)
}

impl VoxelGrid {
    /// New grid with every cell empty
    pub fn new(width: usize, total_height: usize) -> VoxelGrid {
        Self {
            width,
            total_height,
            cells: vec![Cell::default(); width * width * total_height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn total_height(&self) -> usize {
        self.total_height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && (pos.x as usize) < self.width
            && pos.y >= 0
            && (pos.y as usize) < self.total_height
            && pos.z >= 0
            && (pos.z as usize) < self.width
    }

    /// Inclusive cell range covered by the grid. `None` for a zero-sized grid.
    pub fn bounds(&self) -> Option<IAabb> {
        if self.is_empty() {
            return None;
        }
        Some(IAabb::new_rect(
            IVec3::ZERO,
            IVec3::new(
                self.width as i32 - 1,
                self.total_height as i32 - 1,
                self.width as i32 - 1,
            ),
        ))
    }

    fn index(&self, pos: IVec3) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let (x, y, z) = (pos.x as usize, pos.y as usize, pos.z as usize);
        Some((x * self.total_height + y) * self.width + z)
    }

    fn position(&self, index: usize) -> IVec3 {
        let z = index % self.width;
        let y = (index / self.width) % self.total_height;
        let x = index / (self.width * self.total_height);
        IVec3::new(x as i32, y as i32, z as i32)
    }

    /// `None` for any position outside the grid
    pub fn get(&self, pos: IVec3) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Block kind at `pos`, reading out-of-bounds positions as empty.
    pub fn block_at(&self, pos: IVec3) -> BlockKind {
        self.get(pos).map_or(BlockKind::Empty, |cell| cell.kind)
    }

    /// Overwrites the block kind only. Out-of-bounds writes are ignored.
    pub fn set_block_id(&mut self, pos: IVec3, kind: BlockKind) {
        if let Some(i) = self.index(pos) {
            self.cells[i].kind = kind;
        }
    }

    /// Overwrites the renderer back-reference only. Out-of-bounds writes are ignored.
    pub fn set_instance_ref(&mut self, pos: IVec3, instance: Option<u32>) {
        if let Some(i) = self.index(pos) {
            self.cells[i].instance = instance;
        }
    }

    /// True if all six face neighbors are solid. Neighbors outside the grid count as empty.
    /// Accepts any coordinate; neighbors past the i32 range wrap and read as empty.
    pub fn is_fully_occluded(&self, pos: IVec3) -> bool {
        NEIGHBORS
            .iter()
            .all(|offset| !self.block_at(pos.wrapping_add(*offset)).is_empty())
    }

    /// Resets every cell to the empty default.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (self.position(i), cell))
    }

    /// Compares block kinds only, ignoring renderer back-references.
    pub fn same_blocks(&self, other: &VoxelGrid) -> bool {
        self.width == other.width
            && self.total_height == other.total_height
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.kind == b.kind)
    }
}
