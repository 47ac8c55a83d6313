//! Contract directory - which catalog belongs to which deployed address

use alloy_primitives::Address;

use super::InterfaceCatalog;

/// A deployed contract with its interface
#[derive(Debug, Clone)]
pub struct DeployedContract {
    pub name: String,
    pub address: Address,
    pub catalog: InterfaceCatalog,
}

/// Known contracts plus the catalogs every decode checks first
#[derive(Debug, Clone, Default)]
pub struct ContractDirectory {
    /// Catalogs scanned before the resolved contract's own (e.g. proxy admin)
    priority: Vec<InterfaceCatalog>,
    contracts: Vec<DeployedContract>,
}

impl ContractDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a catalog to the priority list
    pub fn with_priority(mut self, catalog: InterfaceCatalog) -> Self {
        self.priority.push(catalog);
        self
    }

    /// Register a deployed contract
    ///
    /// Registration order breaks ties when two entries share an address.
    pub fn with_contract(
        mut self,
        name: impl Into<String>,
        address: Address,
        catalog: InterfaceCatalog,
    ) -> Self {
        self.insert(name, address, catalog);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, address: Address, catalog: InterfaceCatalog) {
        self.contracts.push(DeployedContract {
            name: name.into(),
            address,
            catalog,
        });
    }

    pub fn priority_catalogs(&self) -> &[InterfaceCatalog] {
        &self.priority
    }

    pub fn contracts(&self) -> &[DeployedContract] {
        &self.contracts
    }

    pub fn by_address(&self, address: &Address) -> Option<&DeployedContract> {
        self.contracts.iter().find(|contract| contract.address == *address)
    }

    pub fn by_name(&self, name: &str) -> Option<&DeployedContract> {
        self.contracts.iter().find(|contract| contract.name == name)
    }

    /// First contract matching any candidate, candidates checked in order
    pub fn resolve(&self, candidates: &[Address]) -> Option<&DeployedContract> {
        candidates
            .iter()
            .find_map(|candidate| self.by_address(candidate))
    }

    /// Catalogs to scan for a call into `contract`: priority catalogs first
    pub fn search_order<'a>(&'a self, contract: &'a DeployedContract) -> Vec<&'a InterfaceCatalog> {
        self.priority
            .iter()
            .chain(std::iter::once(&contract.catalog))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn directory() -> ContractDirectory {
        ContractDirectory::new()
            .with_priority(InterfaceCatalog::new("ProxyAdmin", vec![]))
            .with_contract("Staking", addr(0x11), InterfaceCatalog::new("Staking", vec![]))
            .with_contract("DAO", addr(0x22), InterfaceCatalog::new("DAO", vec![]))
    }

    #[test]
    fn test_resolve_checks_candidates_in_order() {
        let directory = directory();

        let found = directory.resolve(&[addr(0x22), addr(0x11)]).unwrap();
        assert_eq!(found.name, "DAO");

        let found = directory.resolve(&[addr(0x99), addr(0x11)]).unwrap();
        assert_eq!(found.name, "Staking");

        assert!(directory.resolve(&[addr(0x99)]).is_none());
        assert!(directory.resolve(&[]).is_none());
    }

    #[test]
    fn test_search_order_puts_priority_first() {
        let directory = directory();
        let staking = directory.by_name("Staking").unwrap();
        let names: Vec<&str> = directory
            .search_order(staking)
            .into_iter()
            .map(|catalog| catalog.name.as_str())
            .collect();
        assert_eq!(names, vec!["ProxyAdmin", "Staking"]);
    }
}
