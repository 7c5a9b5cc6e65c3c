//! Systems that drive wave runs.

pub mod advance;
pub mod load;

pub use advance::advance_wave_runs;
pub use load::start_loaded_wave_runs;

use bevy::prelude::*;
use rand::Rng;

use crate::components::{RunStatus, WaveRun};
use crate::events::{WaveSpecFailed, WaveStarted, WavesFinished};
use crate::scheduler::WaveError;

/// Start the next wave of `run`, or finish the run when none are left.
pub(crate) fn start_next_wave<R: Rng + ?Sized>(
    entity: Entity,
    run: &mut WaveRun,
    rng: &mut R,
    commands: &mut Commands,
) {
    match run.scheduler.next_wave(rng) {
        Ok(spawn) => {
            info!(
                "Wave {} started on {:?}: {} mobs{}",
                spawn.index,
                entity,
                spawn.mobs.len(),
                spawn
                    .special
                    .as_deref()
                    .map(|label| format!(" (special '{label}')"))
                    .unwrap_or_default()
            );

            // keep any overshoot so long frames don't stretch the schedule
            let overshoot = match run.status {
                RunStatus::Running => run.remaining.min(0.0),
                RunStatus::Waiting | RunStatus::Finished => 0.0,
            };
            run.remaining = overshoot + spawn.duration;
            run.status = RunStatus::Running;

            commands.entity(entity).trigger(move |entity| WaveStarted {
                entity,
                index: spawn.index,
                mobs: spawn.mobs,
                duration: spawn.duration,
                special: spawn.special,
            });
        }
        Err(WaveError::Exhausted { count }) => {
            info!("All {} waves finished on {:?}", count, entity);
            run.status = RunStatus::Finished;
            commands.entity(entity).trigger(|entity| WavesFinished { entity });
        }
        Err(err) => {
            error!("Wave run on {:?} stopped: {}", entity, err);
            run.status = RunStatus::Finished;
            let error = err.to_string();
            commands
                .entity(entity)
                .trigger(move |entity| WaveSpecFailed { entity, error });
        }
    }
}
