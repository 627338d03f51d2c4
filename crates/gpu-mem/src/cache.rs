/// GPU L2 cache maintenance.
pub trait L2Cache {
    /// Flush dirty L2 lines to memory, optionally invalidating them.
    ///
    /// Returns only once the flush has completed; writes issued after the call are ordered after
    /// it.
    fn l2_flush(&mut self, invalidate: bool);
}
