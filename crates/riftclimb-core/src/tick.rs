/// Per-tick context threaded through the pipeline phases.
#[derive(Copy, Clone, Debug, Default)]
pub struct TickCtx {
    pub dt: f32,
    pub tick: u64,
}

impl TickCtx {
    pub fn new(dt: f32, tick: u64) -> Self { Self { dt, tick } }
}
