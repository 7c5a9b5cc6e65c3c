//! Counts down wave durations and starts the following waves.

use bevy::prelude::*;

use crate::components::WaveRun;
use crate::plugin::WaveRng;
use crate::systems::start_next_wave;

/// Tick every unpaused [`WaveRun`] and start the next wave when the current
/// one's duration has elapsed.
///
/// At most one wave starts per run per frame.
pub fn advance_wave_runs(
    time: Res<Time>,
    mut rng: ResMut<WaveRng>,
    mut commands: Commands,
    mut query: Query<(Entity, &mut WaveRun)>,
) {
    for (entity, mut run) in &mut query {
        if run.paused || run.is_finished() {
            continue;
        }

        run.remaining -= time.delta_secs();
        if run.remaining > 0.0 {
            continue;
        }

        start_next_wave(entity, &mut run, &mut rng.0, &mut commands);
    }
}
