//! Experience bookkeeping rules

use serde::Serialize;

use crate::domain::EngineError;

/// Weekly awards derived from the players' average experience
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterExperience {
    /// Number of players that contributed to the average
    pub players: usize,
    pub average: f64,
    /// Award for the game master: half the average
    pub master: u32,
    /// Award for the gold knight role: a third of the average
    pub gold: u32,
}

/// Sum experience deltas given as text, failing on the first non-integer
pub fn parse_experience_deltas<S: AsRef<str>>(tokens: &[S]) -> Result<i64, EngineError> {
    if tokens.is_empty() {
        return Err(EngineError::InvalidArgument(
            "at least one experience value is required".to_string(),
        ));
    }

    tokens.iter().try_fold(0i64, |total, token| {
        let token = token.as_ref();
        token
            .trim()
            .parse::<i64>()
            .map(|value| total.saturating_add(value))
            .map_err(|_| EngineError::InvalidArgument(format!("invalid experience value '{}'", token)))
    })
}

/// Average the positive experience totals and derive the weekly awards
///
/// Awards round half to even, so 37.5 becomes 38 and 36.5 becomes 36.
pub fn master_experience(experience: &[u32]) -> Result<MasterExperience, EngineError> {
    let eligible: Vec<u32> = experience.iter().copied().filter(|xp| *xp > 0).collect();
    if eligible.is_empty() {
        return Err(EngineError::NoData(
            "no player has earned experience yet".to_string(),
        ));
    }

    let average = eligible.iter().map(|xp| f64::from(*xp)).sum::<f64>() / eligible.len() as f64;

    Ok(MasterExperience {
        players: eligible.len(),
        average,
        master: (average / 2.0).round_ties_even() as u32,
        gold: (average / 3.0).round_ties_even() as u32,
    })
}
