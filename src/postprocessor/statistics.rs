use crate::scattering::{Valley, ValleyMap};
use crate::trajectory::Snapshot;
use ndarray::Array1;

/// Collects one quantity from every snapshot of a trajectory
pub fn samples(trajectory: &[Snapshot], quantity: impl Fn(&Snapshot) -> f64) -> Array1<f64> {
    trajectory.iter().map(quantity).collect()
}

/// The number of consecutive snapshots in different valleys
pub fn count_intervalley_transitions(trajectory: &[Snapshot]) -> usize {
    trajectory
        .windows(2)
        .filter(|pair| pair[0].valley != pair[1].valley)
        .count()
}

/// The mean energy of the snapshots in each valley, `None` for a valley never visited
pub fn mean_energy_by_valley(trajectory: &[Snapshot]) -> ValleyMap<Option<f64>> {
    ValleyMap::from_fn(|valley: Valley| {
        let (sum, count) = trajectory
            .iter()
            .filter(|snapshot| snapshot.valley == valley)
            .fold((0_f64, 0_usize), |(sum, count), snapshot| {
                (sum + snapshot.energy, count + 1)
            });
        (count > 0).then(|| sum / count as f64)
    })
}
