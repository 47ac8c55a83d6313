//! Validator pool table: row formatting and pagination

use serde::Deserialize;

use crate::domain::Amount;
use crate::modules::toolkit::units::format_coin;

/// Rows per page when none is configured
pub const DEFAULT_PER_PAGE: usize = 10;

const LOADING: &str = "Loading";

/// Validator candidate pool as reported by the staking contract.
///
/// Fields still being fetched are `None` and render as `Loading`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pool {
    pub staking_address: String,
    pub mining_address: String,
    pub ens_name: String,
    pub is_active: Option<bool>,
    pub is_current_validator: bool,
    pub is_to_be_elected: bool,
    pub is_pending_validator: bool,
    pub is_available: bool,
    pub total_stake: Option<Amount>,
    pub candidate_stake: Option<Amount>,
    pub my_stake: Amount,
    pub ordered_withdraw_amount: Amount,
    pub ordered_withdraw_unlock_epoch: u64,
    pub voting_power: Option<Amount>,
    pub score: Option<u64>,
    pub added_in_epoch: u64,
}

/// Action button shown on a pool row for the connected wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolAction {
    Stake,
    Claim,
    Unstake,
}

impl Pool {
    pub fn status_label(&self) -> &'static str {
        match self.is_active {
            Some(true) => "Active",
            Some(false) => "Banned",
            None => LOADING,
        }
    }

    /// Total stake in whole coins, e.g. `2.5 DMD`
    pub fn total_stake_display(&self) -> String {
        self.total_stake
            .as_ref()
            .map(format_coin)
            .unwrap_or_else(|| LOADING.to_string())
    }

    pub fn my_stake_display(&self) -> String {
        format_coin(&self.my_stake)
    }

    /// Voting power as `<v> %`
    pub fn voting_power_display(&self) -> String {
        self.voting_power
            .as_ref()
            .map(|power| format!("{} %", power))
            .unwrap_or_else(|| LOADING.to_string())
    }

    pub fn score_display(&self) -> String {
        self.score
            .map(|score| score.to_string())
            .unwrap_or_else(|| LOADING.to_string())
    }

    /// An ordered withdrawal that has unlocked by `staking_epoch`
    pub fn can_claim(&self, staking_epoch: u64) -> bool {
        !self.ordered_withdraw_amount.is_zero() && self.ordered_withdraw_unlock_epoch <= staking_epoch
    }

    /// Buttons for the connected wallet: stake on active pools, then claim
    /// an unlocked withdrawal or else unstake an existing stake
    pub fn row_actions(&self, staking_epoch: u64) -> Vec<PoolAction> {
        let mut actions = Vec::new();
        if self.is_active == Some(true) {
            actions.push(PoolAction::Stake);
        }
        if self.can_claim(staking_epoch) {
            actions.push(PoolAction::Claim);
        } else if !self.my_stake.is_zero() {
            actions.push(PoolAction::Unstake);
        }
        actions
    }

    /// Table cells: status, wallet, total stake, voting power, score
    pub fn row(&self) -> Vec<String> {
        vec![
            self.status_label().to_string(),
            if self.staking_address.is_empty() {
                LOADING.to_string()
            } else {
                self.staking_address.clone()
            },
            self.total_stake_display(),
            self.voting_power_display(),
            self.score_display(),
        ]
    }
}

/// Page position over a list of rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
    current: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

impl Paginator {
    /// Zero rows per page falls back to the default
    pub fn new(per_page: usize) -> Self {
        Self {
            per_page: if per_page == 0 { DEFAULT_PER_PAGE } else { per_page },
            current: 0,
        }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    pub fn set_page(&mut self, page: usize) {
        self.current = page;
    }

    pub fn next(&mut self, total: usize) {
        if self.current.saturating_add(1) < self.page_count(total) {
            self.current += 1;
        }
    }

    pub fn previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Rows on `page`; empty when the page is past the end
    pub fn page<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let start = page.saturating_mul(self.per_page);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.per_page).min(items.len());
        &items[start..end]
    }

    pub fn current_items<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.page(items, self.current)
    }
}
