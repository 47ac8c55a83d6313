//! Proposal drafts: validation and encoding into `targets`/`values`/`calldatas`

use std::fmt;
use std::str::FromStr;

use alloy_dyn_abi::{DynSolType, DynSolValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::abi::{ContractDirectory, FunctionEntry, SelectorHasher};
use crate::domain::Amount;
use crate::modules::toolkit::address::is_valid_address;
use crate::modules::toolkit::units::parse_coin_amount;

/// Target of the no-op action an empty open proposal carries
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Contracts whose governable parameters are all numeric
pub const NUMERIC_CONTRACTS: [&str; 3] = ["Staking", "Block Reward", "Connectivity Tracker"];

/// Errors raised while turning a draft into proposal actions.
///
/// Transaction numbers are 1-based, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("Invalid Transaction {0} payout address")]
    PayoutAddress(usize),
    #[error("Invalid Transaction {0} payout amount")]
    PayoutAmount(usize),
    #[error("Invalid Transaction {0} Contract Address")]
    ContractAddress(usize),
    #[error("Invalid Transaction {0} Contract Calldata")]
    ContractCalldata(usize),
    #[error("Invalid {0} value")]
    ParameterValue(String),
    #[error("Invalid parameter selection: {0}")]
    Selection(String),
    #[error("Unknown contract: {0}")]
    UnknownContract(String),
    #[error("{contract} has no function {setter}")]
    UnknownSetter { contract: String, setter: String },
    #[error("Cannot encode {setter}: {reason}")]
    Encoding { setter: String, reason: String },
    #[error("Unknown proposal type: {0}")]
    UnknownKind(String),
    #[error("Proposal title is required")]
    MissingTitle,
    #[error("Proposal description is required")]
    MissingDescription,
}

/// Proposal types offered when creating a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProposalKind {
    Open,
    ContractUpgrade,
    EcosystemParameterChange,
}

impl ProposalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalKind::Open => "open",
            ProposalKind::ContractUpgrade => "contract-upgrade",
            ProposalKind::EcosystemParameterChange => "ecosystem-parameter-change",
        }
    }
}

impl fmt::Display for ProposalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProposalKind {
    type Err = ProposalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "open" => Ok(ProposalKind::Open),
            "contract-upgrade" => Ok(ProposalKind::ContractUpgrade),
            "ecosystem-parameter-change" => Ok(ProposalKind::EcosystemParameterChange),
            other => Err(ProposalError::UnknownKind(other.to_string())),
        }
    }
}

/// Payout row of an open proposal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutField {
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub amount: String,
}

impl PayoutField {
    pub fn new(target: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            amount: amount.into(),
        }
    }

    fn is_blank(&self) -> bool {
        self.target.trim().is_empty() && self.amount.trim().is_empty()
    }
}

/// Call row of a contract upgrade proposal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallField {
    #[serde(default)]
    pub contract_address: String,
    #[serde(default)]
    pub contract_calldata: String,
}

impl ContractCallField {
    pub fn new(contract_address: impl Into<String>, contract_calldata: impl Into<String>) -> Self {
        Self {
            contract_address: contract_address.into(),
            contract_calldata: contract_calldata.into(),
        }
    }
}

/// Governable parameter picked as `Contract:Label:setter(types)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParameterSelection {
    pub contract: String,
    pub label: String,
    pub setter: String,
}

impl ParameterSelection {
    /// Setter name without its parameter list
    pub fn setter_name(&self) -> &str {
        self.setter
            .split_once('(')
            .map(|(name, _)| name)
            .unwrap_or(&self.setter)
    }

    pub fn is_numeric(&self) -> bool {
        NUMERIC_CONTRACTS.contains(&self.contract.as_str())
    }
}

impl FromStr for ParameterSelection {
    type Err = ProposalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(contract), Some(label), Some(setter))
                if !contract.is_empty() && !setter.is_empty() =>
            {
                Ok(Self {
                    contract: contract.to_string(),
                    label: label.to_string(),
                    setter: setter.to_string(),
                })
            }
            _ => Err(ProposalError::Selection(s.to_string())),
        }
    }
}

impl TryFrom<String> for ParameterSelection {
    type Error = ProposalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ParameterSelection> for String {
    fn from(selection: ParameterSelection) -> Self {
        selection.to_string()
    }
}

impl fmt::Display for ParameterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.contract, self.label, self.setter)
    }
}

/// Proposal as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ProposalDraft {
    Open {
        #[serde(default)]
        payouts: Vec<PayoutField>,
    },
    ContractUpgrade {
        calls: Vec<ContractCallField>,
    },
    EcosystemParameterChange {
        selection: ParameterSelection,
        value: String,
    },
}

impl ProposalDraft {
    pub fn kind(&self) -> ProposalKind {
        match self {
            ProposalDraft::Open { .. } => ProposalKind::Open,
            ProposalDraft::ContractUpgrade { .. } => ProposalKind::ContractUpgrade,
            ProposalDraft::EcosystemParameterChange { .. } => {
                ProposalKind::EcosystemParameterChange
            }
        }
    }

    /// Validate the draft and produce its on-chain actions
    pub fn build_actions(
        &self,
        hasher: &impl SelectorHasher,
        directory: &ContractDirectory,
    ) -> Result<ProposalActions, ProposalError> {
        let actions = match self {
            ProposalDraft::Open { payouts } => open_actions(payouts)?,
            ProposalDraft::ContractUpgrade { calls } => contract_upgrade_actions(calls)?,
            ProposalDraft::EcosystemParameterChange { selection, value } => {
                parameter_change_actions(hasher, directory, selection, value)?
            }
        };
        debug!("{} proposal with {} actions", self.kind(), actions.len());
        Ok(actions)
    }
}

/// Proposal form: user-facing metadata plus the typed draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub title: String,
    pub description: String,
    /// Link to the discussion thread, may be empty
    #[serde(default)]
    pub discussion_url: String,
    pub draft: ProposalDraft,
}

impl Proposal {
    /// Check the metadata, then build the draft's actions.
    ///
    /// Title and description are required; the discussion URL is optional.
    pub fn submission(
        &self,
        hasher: &impl SelectorHasher,
        directory: &ContractDirectory,
    ) -> Result<ProposalSubmission, ProposalError> {
        if self.title.trim().is_empty() {
            return Err(ProposalError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ProposalError::MissingDescription);
        }

        let actions = self.draft.build_actions(hasher, directory)?;
        Ok(ProposalSubmission {
            kind: self.draft.kind(),
            title: self.title.trim().to_string(),
            discussion_url: self.discussion_url.trim().to_string(),
            description: self.description.trim().to_string(),
            actions,
        })
    }
}

/// Everything the governance contract's `createProposal` receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalSubmission {
    pub kind: ProposalKind,
    pub title: String,
    pub discussion_url: String,
    pub description: String,
    pub actions: ProposalActions,
}

/// Parallel action lists submitted with a proposal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalActions {
    pub targets: Vec<String>,
    pub values: Vec<String>,
    pub calldatas: Vec<String>,
}

impl ProposalActions {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn push(&mut self, target: String, value: String, calldata: String) {
        self.targets.push(target);
        self.values.push(value);
        self.calldatas.push(calldata);
    }
}

fn open_actions(payouts: &[PayoutField]) -> Result<ProposalActions, ProposalError> {
    let mut actions = ProposalActions::default();

    if payouts.iter().all(PayoutField::is_blank) {
        actions.push(ZERO_ADDRESS.to_string(), "0".to_string(), "0x".to_string());
        return Ok(actions);
    }

    // every address is checked before any amount
    for (idx, field) in payouts.iter().enumerate() {
        if !is_valid_address(field.target.trim()) {
            return Err(ProposalError::PayoutAddress(idx + 1));
        }
    }

    for (idx, field) in payouts.iter().enumerate() {
        let wei = parse_coin_amount(&field.amount)
            .map_err(|_| ProposalError::PayoutAmount(idx + 1))?;
        actions.push(field.target.trim().to_string(), wei.to_string(), "0x".to_string());
    }

    Ok(actions)
}

fn contract_upgrade_actions(calls: &[ContractCallField]) -> Result<ProposalActions, ProposalError> {
    let mut actions = ProposalActions::default();

    for (idx, field) in calls.iter().enumerate() {
        if !is_valid_address(field.contract_address.trim()) {
            return Err(ProposalError::ContractAddress(idx + 1));
        }
    }

    for (idx, field) in calls.iter().enumerate() {
        let calldata = field.contract_calldata.trim();
        if matches!(calldata, "" | "0x" | "0" | "0x0") {
            return Err(ProposalError::ContractCalldata(idx + 1));
        }
        actions.push(
            field.contract_address.trim().to_string(),
            "0".to_string(),
            calldata.to_string(),
        );
    }

    Ok(actions)
}

fn parameter_change_actions(
    hasher: &impl SelectorHasher,
    directory: &ContractDirectory,
    selection: &ParameterSelection,
    value: &str,
) -> Result<ProposalActions, ProposalError> {
    if selection.is_numeric() && value.parse::<Amount>().is_err() {
        return Err(ProposalError::ParameterValue(selection.setter.clone()));
    }

    let contract = directory
        .by_name(&selection.contract)
        .ok_or_else(|| ProposalError::UnknownContract(selection.contract.clone()))?;

    let function = contract
        .catalog
        .function_by_signature(&selection.setter.replace(' ', ""))
        .or_else(|| contract.catalog.function_by_name(selection.setter_name()))
        .ok_or_else(|| ProposalError::UnknownSetter {
            contract: selection.contract.clone(),
            setter: selection.setter.clone(),
        })?;

    let calldata = encode_setter_call(hasher, function, value)?;

    let mut actions = ProposalActions::default();
    actions.push(contract.address.to_checksum(None), "0".to_string(), calldata);
    Ok(actions)
}

/// `0x` + selector + the single ABI-encoded argument
pub fn encode_setter_call(
    hasher: &impl SelectorHasher,
    function: &FunctionEntry,
    value: &str,
) -> Result<String, ProposalError> {
    let signature = function.signature();
    let encoding_error = |reason: String| ProposalError::Encoding {
        setter: signature.clone(),
        reason,
    };

    let [param] = function.inputs.as_slice() else {
        return Err(encoding_error(format!(
            "expected one parameter, found {}",
            function.inputs.len()
        )));
    };

    let kind = DynSolType::parse(&param.kind).map_err(|e| encoding_error(e.to_string()))?;
    let argument = kind
        .coerce_str(value.trim())
        .map_err(|e| encoding_error(e.to_string()))?;
    let encoded = DynSolValue::Tuple(vec![argument]).abi_encode_params();

    Ok(format!(
        "0x{}{}",
        hex::encode(hasher.selector(&signature)),
        hex::encode(encoded)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::abi::{InterfaceCatalog, InterfaceEntry, ParamSpec};
    use crate::infrastructure::abi::Keccak256Hasher;
    use alloy_primitives::Address;

    const STAKING: &str = "0x1100000000000000000000000000000000000001";
    const PAYEE: &str = "0x2200000000000000000000000000000000000002";

    fn directory() -> ContractDirectory {
        let catalog = InterfaceCatalog::new(
            "StakingHbbft",
            vec![InterfaceEntry::Function(FunctionEntry::new(
                "setDelegatorMinStake",
                vec![ParamSpec::new("_minStake", "uint256")],
            ))],
        );
        ContractDirectory::new().with_contract("Staking", STAKING.parse::<Address>().unwrap(), catalog)
    }

    fn build(draft: &ProposalDraft) -> Result<ProposalActions, ProposalError> {
        draft.build_actions(&Keccak256Hasher, &directory())
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("open".parse::<ProposalKind>().unwrap(), ProposalKind::Open);
        assert_eq!(
            "ecosystem-parameter-change".parse::<ProposalKind>().unwrap(),
            ProposalKind::EcosystemParameterChange
        );
        assert!("other".parse::<ProposalKind>().is_err());
    }

    #[test]
    fn test_open_placeholder() {
        let draft = ProposalDraft::Open {
            payouts: vec![PayoutField::default(), PayoutField::new(" ", "")],
        };
        let actions = build(&draft).unwrap();
        assert_eq!(actions.targets, vec![ZERO_ADDRESS]);
        assert_eq!(actions.values, vec!["0"]);
        assert_eq!(actions.calldatas, vec!["0x"]);
    }

    #[test]
    fn test_open_payouts() {
        let draft = ProposalDraft::Open {
            payouts: vec![PayoutField::new(PAYEE, "1.5")],
        };
        let actions = build(&draft).unwrap();
        assert_eq!(actions.targets, vec![PAYEE]);
        assert_eq!(actions.values, vec!["1500000000000000000"]);
        assert_eq!(actions.calldatas, vec!["0x"]);
    }

    #[test]
    fn test_open_errors() {
        let bad_address = ProposalDraft::Open {
            payouts: vec![PayoutField::new(PAYEE, "1"), PayoutField::new("0x12", "oops")],
        };
        assert_eq!(
            build(&bad_address).unwrap_err().to_string(),
            "Invalid Transaction 2 payout address"
        );

        let bad_amount = ProposalDraft::Open {
            payouts: vec![PayoutField::new(PAYEE, "-1")],
        };
        assert_eq!(
            build(&bad_amount).unwrap_err().to_string(),
            "Invalid Transaction 1 payout amount"
        );
    }

    #[test]
    fn test_contract_upgrade() {
        let draft = ProposalDraft::ContractUpgrade {
            calls: vec![ContractCallField::new(STAKING, "0x3659cfe6")],
        };
        let actions = build(&draft).unwrap();
        assert_eq!(actions.values, vec!["0"]);
        assert_eq!(actions.calldatas, vec!["0x3659cfe6"]);

        for empty in ["", "0x", "0", "0x0"] {
            let draft = ProposalDraft::ContractUpgrade {
                calls: vec![ContractCallField::new(STAKING, empty)],
            };
            assert_eq!(build(&draft).unwrap_err(), ProposalError::ContractCalldata(1));
        }

        let draft = ProposalDraft::ContractUpgrade {
            calls: vec![ContractCallField::new("staking", "0x3659cfe6")],
        };
        assert_eq!(
            build(&draft).unwrap_err().to_string(),
            "Invalid Transaction 1 Contract Address"
        );
    }

    #[test]
    fn test_parameter_change() {
        let selection: ParameterSelection =
            "Staking:Delegator Min. Stake:setDelegatorMinStake(uint256)".parse().unwrap();
        assert_eq!(selection.setter_name(), "setDelegatorMinStake");

        let draft = ProposalDraft::EcosystemParameterChange {
            selection: selection.clone(),
            value: "1000".to_string(),
        };
        let actions = build(&draft).unwrap();
        let selector = hex::encode(Keccak256Hasher.selector("setDelegatorMinStake(uint256)"));
        assert_eq!(actions.targets.len(), 1);
        assert!(actions.targets[0].eq_ignore_ascii_case(STAKING));
        assert_eq!(actions.values, vec!["0"]);
        assert_eq!(actions.calldatas[0], format!("0x{}{:064x}", selector, 1000));

        let draft = ProposalDraft::EcosystemParameterChange {
            selection,
            value: "lots".to_string(),
        };
        assert_eq!(
            build(&draft).unwrap_err().to_string(),
            "Invalid setDelegatorMinStake(uint256) value"
        );
    }

    #[test]
    fn test_parameter_change_resolution_errors() {
        let draft = ProposalDraft::EcosystemParameterChange {
            selection: "DAO:Fee:setCreateProposalFee(uint256)".parse().unwrap(),
            value: "1".to_string(),
        };
        assert!(matches!(build(&draft), Err(ProposalError::UnknownContract(_))));

        let draft = ProposalDraft::EcosystemParameterChange {
            selection: "Staking:Gas:setMinimumGasPrice(uint256)".parse().unwrap(),
            value: "1".to_string(),
        };
        assert!(matches!(build(&draft), Err(ProposalError::UnknownSetter { .. })));

        assert!("Staking".parse::<ParameterSelection>().is_err());
    }

    #[test]
    fn test_proposal_submission() {
        let json = r#"{
            "title": " Fund the audit ",
            "description": "Pay the auditors",
            "draft": {"type": "open", "payouts": [{"target": "0x2200000000000000000000000000000000000002", "amount": "2"}]}
        }"#;
        let proposal: Proposal = serde_json::from_str(json).unwrap();
        assert_eq!(proposal.discussion_url, "");

        let submission = proposal.submission(&Keccak256Hasher, &directory()).unwrap();
        assert_eq!(submission.kind, ProposalKind::Open);
        assert_eq!(submission.title, "Fund the audit");
        assert_eq!(submission.description, "Pay the auditors");
        assert_eq!(submission.actions.values, vec!["2000000000000000000"]);
    }

    #[test]
    fn test_proposal_requires_title_and_description() {
        let mut proposal = Proposal {
            title: "".to_string(),
            description: "Raise the minimum stake".to_string(),
            discussion_url: "https://forum.example/t/42".to_string(),
            draft: ProposalDraft::Open { payouts: vec![] },
        };
        assert_eq!(
            proposal.submission(&Keccak256Hasher, &directory()).unwrap_err().to_string(),
            "Proposal title is required"
        );

        proposal.title = "Min stake".to_string();
        proposal.description = "  ".to_string();
        assert_eq!(
            proposal.submission(&Keccak256Hasher, &directory()),
            Err(ProposalError::MissingDescription)
        );

        proposal.description = "Raise the minimum stake".to_string();
        let submission = proposal.submission(&Keccak256Hasher, &directory()).unwrap();
        assert_eq!(submission.discussion_url, "https://forum.example/t/42");
        assert_eq!(submission.actions.targets, vec![ZERO_ADDRESS]);
    }

    #[test]
    fn test_draft_from_json() {
        let json = r#"{
            "type": "ecosystem-parameter-change",
            "selection": "Staking:Delegator Min. Stake:setDelegatorMinStake(uint256)",
            "value": "5"
        }"#;
        let draft: ProposalDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.kind(), ProposalKind::EcosystemParameterChange);

        let json = r#"{"type":"contract-upgrade","calls":[{"contractAddress":"0x1","contractCalldata":"0x"}]}"#;
        let draft: ProposalDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.kind(), ProposalKind::ContractUpgrade);
    }
}
