/*
 * Debug Information Module
 *
 * Per-frame statistics shown in the controls window:
 * - FPS and frame time
 * - Tick counter and population
 * - Number of trail circles drawn
 * - The keyboard displacement hint
 */

use std::time::Duration;

#[derive(Debug, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub tick: u64,
    pub agents: usize,
    pub circles: usize,
    pub displacement: (f64, f64),
}
