//! Governance home: wallet stake summary, phase and historic indexing status

use serde::Deserialize;

use crate::domain::Amount;
use crate::modules::toolkit::units::format_coin;

/// Phase of the current governance round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum DaoPhase {
    #[serde(rename = "0")]
    Proposal,
    #[serde(rename = "1")]
    Voting,
}

impl DaoPhase {
    pub fn label(&self) -> &'static str {
        match self {
            DaoPhase::Proposal => "Proposal Phase",
            DaoPhase::Voting => "Voting Phase",
        }
    }
}

/// A proposal listed on the historic page; `state` stays empty until its
/// details have been fetched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoricProposal {
    pub id: String,
    pub state: String,
}

impl HistoricProposal {
    pub fn is_fetched(&self) -> bool {
        !self.state.is_empty()
    }
}

/// Snapshot of the governance page for the connected wallet
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaoOverview {
    pub my_total_stake: Option<Amount>,
    pub total_staked_amount: Option<Amount>,
    pub phase: Option<DaoPhase>,
    pub historic_proposals: Vec<HistoricProposal>,
}

impl DaoOverview {
    /// Own stake in whole coins; unknown stake shows as zero
    pub fn stake_display(&self) -> String {
        format_coin(&self.my_total_stake.unwrap_or_default())
    }

    /// Share of the total DAO weight held by the wallet, e.g. `"12.50 %"`
    pub fn weight_display(&self) -> String {
        let bp = match (&self.my_total_stake, &self.total_staked_amount) {
            (Some(mine), Some(total)) => mine.basis_points_within(&Amount::ZERO, total),
            _ => 0,
        };
        format!("{}.{:02} %", bp / 100, bp % 100)
    }

    pub fn phase_label(&self) -> &'static str {
        self.phase.map(|phase| phase.label()).unwrap_or("Loading")
    }

    /// Proposals can only be created during the proposal phase
    pub fn can_create_proposal(&self) -> bool {
        self.phase == Some(DaoPhase::Proposal)
    }

    pub fn indexing_status(&self) -> Option<String> {
        let fetched = self
            .historic_proposals
            .iter()
            .filter(|proposal| proposal.is_fetched())
            .count();
        indexing_status(fetched, self.historic_proposals.len())
    }
}

/// `Indexing: N% complete` while historic proposals are still being fetched.
///
/// `N` is rounded half up; nothing is shown once it reaches 100.
pub fn indexing_status(fetched: usize, total: usize) -> Option<String> {
    if total == 0 {
        return Some("Indexing: Fetching historic proposals count".to_string());
    }
    let fetched = fetched.min(total) as u128;
    let total = total as u128;
    let percent = (fetched * 200 + total) / (total * 2);
    if percent >= 100 {
        None
    } else {
        Some(format!("Indexing: {}% complete", percent))
    }
}
