//! Stop and line registry with directional road distances
//!
//! Index-keyed replacement for the usual pointer-keyed lookup tables: stops
//! and lines are interned into dense ids at insertion, and every other table
//! is keyed by those ids.

use geo::{Distance, Haversine, Point};
use hashbrown::{HashMap, HashSet};
use itertools::Itertools;
use serde::Serialize;

use crate::model::types::{Line, Stop, TransitDataProvider};
use crate::{Error, LineId, Meters, StopId};

/// Summary statistics for one line, as reported to stat consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineStats {
    /// Stops on the full traversal (doubled for a linear line).
    pub stop_count: usize,
    pub unique_stops: usize,
    /// Road length of the full traversal in meters.
    pub length_m: u64,
    /// Ratio of road length to great-circle length.
    pub curvature: f64,
}

/// In-memory registry of stops, lines and pairwise road distances.
///
/// Stop ids are assigned in insertion order and never change, which makes
/// the vertex enumeration of graphs built from a catalogue deterministic.
#[derive(Debug, Clone, Default)]
pub struct TransitCatalogue {
    stops: Vec<Stop>,
    lines: Vec<Line>,
    stop_index: HashMap<String, StopId>,
    line_index: HashMap<String, LineId>,
    distances: HashMap<(StopId, StopId), Meters>,
    lines_by_stop: Vec<Vec<LineId>>,
}

impl TransitCatalogue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop, or updates its location if the name is already known.
    pub fn add_stop(&mut self, name: &str, latitude: f64, longitude: f64) -> StopId {
        if let Some(&id) = self.stop_index.get(name) {
            self.stops[id].location = Point::new(longitude, latitude);
            return id;
        }

        let id = self.stops.len();
        self.stops.push(Stop {
            name: name.to_string(),
            location: Point::new(longitude, latitude),
        });
        self.stop_index.insert(name.to_string(), id);
        self.lines_by_stop.push(Vec::new());
        id
    }

    /// Adds a line over already-registered stops.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownStop`] if any stop name is not in the
    /// catalogue; the line is not registered in that case.
    pub fn add_line<S: AsRef<str>>(
        &mut self,
        name: &str,
        is_circular: bool,
        stop_names: &[S],
    ) -> Result<LineId, Error> {
        let stops = stop_names
            .iter()
            .map(|stop_name| {
                let stop_name = stop_name.as_ref();
                self.stop_index
                    .get(stop_name)
                    .copied()
                    .ok_or_else(|| Error::UnknownStop(stop_name.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let id = self.lines.len();
        for &stop in &stops {
            if !self.lines_by_stop[stop].contains(&id) {
                self.lines_by_stop[stop].push(id);
            }
        }
        self.lines.push(Line {
            name: name.to_string(),
            is_circular,
            stops,
        });
        self.line_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Records the directional road distance between two stops.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnknownStop`] if either stop is not registered.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: Meters) -> Result<(), Error> {
        let from = self.require_stop(from)?;
        let to = self.require_stop(to)?;
        self.distances.insert((from, to), meters);
        Ok(())
    }

    #[must_use]
    pub fn stop_id(&self, name: &str) -> Option<StopId> {
        self.stop_index.get(name).copied()
    }

    #[must_use]
    pub fn line_id(&self, name: &str) -> Option<LineId> {
        self.line_index.get(name).copied()
    }

    /// Names of the lines serving a stop, lexicographically sorted.
    /// `None` for an unknown stop, empty for a stop no line passes through.
    #[must_use]
    pub fn lines_through(&self, stop_name: &str) -> Option<Vec<&str>> {
        let stop = self.stop_id(stop_name)?;
        let mut names: Vec<&str> = self.lines_by_stop[stop]
            .iter()
            .map(|&line| self.lines[line].name.as_str())
            .collect();
        names.sort_unstable();
        Some(names)
    }

    /// Traversal statistics for one line, or `None` if the name is unknown.
    #[must_use]
    pub fn line_stats(&self, line_name: &str) -> Option<LineStats> {
        let line = &self.lines[self.line_id(line_name)?];
        if line.stops.len() < 2 {
            return Some(LineStats {
                stop_count: line.stops.len(),
                unique_stops: line.stops.len(),
                length_m: 0,
                curvature: 0.0,
            });
        }

        let stop_count = if line.is_circular {
            line.stops.len()
        } else {
            line.stops.len() * 2 - 1
        };
        let unique_stops = line.stops.iter().collect::<HashSet<_>>().len();

        let mut length_m = 0u64;
        let mut geo_length = 0.0f64;
        for (&a, &b) in line.stops.iter().tuple_windows() {
            let leg_geo = Haversine.distance(self.stops[a].location, self.stops[b].location);
            if line.is_circular {
                length_m += u64::from(self.distance(a, b));
                geo_length += leg_geo;
            } else {
                length_m += u64::from(self.distance(a, b)) + u64::from(self.distance(b, a));
                geo_length += 2.0 * leg_geo;
            }
        }

        let curvature = if geo_length > 0.0 {
            length_m as f64 / geo_length
        } else {
            0.0
        };

        Some(LineStats {
            stop_count,
            unique_stops,
            length_m,
            curvature,
        })
    }

    fn require_stop(&self, name: &str) -> Result<StopId, Error> {
        self.stop_id(name)
            .ok_or_else(|| Error::UnknownStop(name.to_string()))
    }
}

impl TransitDataProvider for TransitCatalogue {
    fn stops(&self) -> &[Stop] {
        &self.stops
    }

    fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Directional lookup with fallback to the reverse direction; a pair
    /// recorded in neither direction has distance 0.
    fn distance(&self, from: StopId, to: StopId) -> Meters {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
            .unwrap_or(0)
    }
}
