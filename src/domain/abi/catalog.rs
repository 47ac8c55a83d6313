//! Interface catalogs - the strongly-typed view of a contract ABI

/// A typed parameter of a function, event or constructor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name (may be empty)
    pub name: String,
    /// Canonical Solidity type (e.g., "address", "uint256", "(uint256,address)")
    pub kind: String,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

/// A callable function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub name: String,
    pub inputs: Vec<ParamSpec>,
}

impl FunctionEntry {
    pub fn new(name: impl Into<String>, inputs: Vec<ParamSpec>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        canonical_signature(&self.name, &self.inputs)
    }
}

/// An event declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEntry {
    pub name: String,
    pub inputs: Vec<ParamSpec>,
    pub anonymous: bool,
}

/// A constructor declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorEntry {
    pub inputs: Vec<ParamSpec>,
}

/// One entry of an interface catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceEntry {
    Function(FunctionEntry),
    Event(EventEntry),
    Constructor(ConstructorEntry),
}

impl InterfaceEntry {
    pub fn as_function(&self) -> Option<&FunctionEntry> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// Ordered collection of interface entries for one contract.
///
/// Entry order is the order of the source ABI and is significant: selector
/// scans stop at the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceCatalog {
    /// Human-readable name (contract or artifact name)
    pub name: String,
    entries: Vec<InterfaceEntry>,
}

impl InterfaceCatalog {
    pub fn new(name: impl Into<String>, entries: Vec<InterfaceEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn entries(&self) -> &[InterfaceEntry] {
        &self.entries
    }

    /// Function entries in catalog order
    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.entries.iter().filter_map(InterfaceEntry::as_function)
    }

    /// First function with the given name
    pub fn function_by_name(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions().find(|function| function.name == name)
    }

    /// First function with the given canonical signature
    pub fn function_by_signature(&self, signature: &str) -> Option<&FunctionEntry> {
        self.functions()
            .find(|function| function.signature() == signature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn canonical_signature(name: &str, inputs: &[ParamSpec]) -> String {
    let types: Vec<&str> = inputs.iter().map(|param| param.kind.as_str()).collect();
    format!("{}({})", name, types.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staking_catalog() -> InterfaceCatalog {
        InterfaceCatalog::new(
            "Staking",
            vec![
                InterfaceEntry::Constructor(ConstructorEntry { inputs: vec![] }),
                InterfaceEntry::Event(EventEntry {
                    name: "PlacedStake".to_string(),
                    inputs: vec![ParamSpec::new("toPoolStakingAddress", "address")],
                    anonymous: false,
                }),
                InterfaceEntry::Function(FunctionEntry::new(
                    "setDelegatorMinStake",
                    vec![ParamSpec::new("_minStake", "uint256")],
                )),
                InterfaceEntry::Function(FunctionEntry::new("stakingEpoch", vec![])),
            ],
        )
    }

    #[test]
    fn test_signature() {
        let function = FunctionEntry::new(
            "transfer",
            vec![
                ParamSpec::new("to", "address"),
                ParamSpec::new("amount", "uint256"),
            ],
        );
        assert_eq!(function.signature(), "transfer(address,uint256)");
        assert_eq!(FunctionEntry::new("stakingEpoch", vec![]).signature(), "stakingEpoch()");
    }

    #[test]
    fn test_functions_skip_other_entries() {
        let catalog = staking_catalog();
        assert_eq!(catalog.len(), 4);

        let names: Vec<&str> = catalog.functions().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["setDelegatorMinStake", "stakingEpoch"]);
    }

    #[test]
    fn test_lookup_by_name_and_signature() {
        let catalog = staking_catalog();
        assert!(catalog.function_by_name("stakingEpoch").is_some());
        assert!(catalog.function_by_name("PlacedStake").is_none());
        assert!(catalog
            .function_by_signature("setDelegatorMinStake(uint256)")
            .is_some());
    }
}
