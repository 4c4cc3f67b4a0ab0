//! Per-energy discrete distributions over the scattering channels of each valley
//!
//! Channel rates are normalised by the maximum total rate of their valley and a null
//! self-scattering channel takes up the remaining probability, so the total event rate in
//! each valley is the constant maximum rate.

use super::{RateTable, ScatteringChannel, Valley, ValleyMap};
use crate::spectral::EnergyAxis;
use ndarray::{Array2, ArrayView1, Axis};

/// The outcome of inverse-transform sampling on a cumulative column
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectedRow {
    /// The null channel, the electron state is left untouched
    SelfScattering,
    /// A real channel, identified by its position in the valley's channel list
    Channel(usize),
}

/// Cumulative scattering probabilities for every valley on a common energy axis
///
/// Each valley holds a matrix with one row per channel plus two: row 0 is the probability
/// of self-scattering, rows `1..=n` are the running sum of the channel probabilities and
/// row `n + 1` is exactly one. Column `i` belongs to sample `i` of the energy axis.
#[derive(Clone, Debug)]
pub struct CumulativeTable {
    axis: EnergyAxis,
    columns: ValleyMap<Array2<f64>>,
    channels: ValleyMap<Vec<ScatteringChannel>>,
    maximum_rate: ValleyMap<f64>,
}

impl CumulativeTable {
    pub fn build(rates: &RateTable) -> Self {
        let axis = rates.axis().clone();
        let columns = ValleyMap::from_fn(|valley| cumulate(rates, valley));
        let channels = ValleyMap::from_fn(|valley| rates.valley(valley).channels().to_vec());
        let maximum_rate = ValleyMap::from_fn(|valley| rates.maximum_rate(valley));
        Self {
            axis,
            columns,
            channels,
            maximum_rate,
        }
    }

    pub fn energy_axis(&self) -> &EnergyAxis {
        &self.axis
    }

    /// The constant event rate of `valley`, in 1/s
    pub fn maximum_rate(&self, valley: Valley) -> f64 {
        self.maximum_rate[valley]
    }

    /// The real channels out of `valley` in row order
    pub fn channels(&self, valley: Valley) -> &[ScatteringChannel] {
        &self.channels[valley]
    }

    /// The full cumulative matrix of `valley`
    pub fn table(&self, valley: Valley) -> &Array2<f64> {
        &self.columns[valley]
    }

    /// The cumulative column for the axis sample nearest to `energy`
    pub fn lookup(&self, valley: Valley, energy: f64) -> ArrayView1<'_, f64> {
        let index = self.axis.nearest_index(energy);
        self.columns[valley].column(index)
    }

    /// The channel described by `row` of the table of `valley`
    ///
    /// The self-scattering row and rows past the end of the table have no channel. The
    /// closing row is attributed to the last real channel.
    pub fn channel_meta(&self, valley: Valley, row: usize) -> Option<&ScatteringChannel> {
        let channels = &self.channels[valley];
        match row {
            0 => None,
            row if row <= channels.len() => channels.get(row - 1),
            row if row == channels.len() + 1 => channels.last(),
            _ => None,
        }
    }

    pub fn self_scattering_probability(&self, valley: Valley, energy: f64) -> f64 {
        self.lookup(valley, energy)[0]
    }

    /// Select the smallest row of the column at `energy` whose value exceeds `draw`
    pub fn select_row(&self, valley: Valley, energy: f64, draw: f64) -> SelectedRow {
        let column = self.lookup(valley, energy);
        let last = column.len() - 1;
        let row = column
            .iter()
            .position(|&value| value > draw)
            .unwrap_or(last);
        let num_channels = self.channels[valley].len();
        match row {
            0 => SelectedRow::SelfScattering,
            row => SelectedRow::Channel(row.min(num_channels) - 1),
        }
    }
}

fn cumulate(rates: &RateTable, valley: Valley) -> Array2<f64> {
    let valley_rates = rates.valley(valley);
    let maximum = valley_rates.maximum();
    let num_channels = valley_rates.channels().len();
    let mut table = Array2::zeros((num_channels + 2, rates.axis().num_points()));

    for (index, mut column) in table.axis_iter_mut(Axis(1)).enumerate() {
        let probabilities = valley_rates
            .rates()
            .iter()
            .map(|rate| rate[index] / maximum)
            .collect::<Vec<_>>();
        let real: f64 = probabilities.iter().sum();
        let mut running = (1_f64 - real).max(0_f64);
        column[0] = running;
        let mut previous = running;
        for (row, probability) in probabilities.into_iter().enumerate() {
            running += probability;
            let value = running.min(1_f64).max(previous);
            column[row + 1] = value;
            previous = value;
        }
        column[num_channels + 1] = 1_f64;
    }
    table
}
