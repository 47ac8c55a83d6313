//! Calldata decoding against a contract directory
//!
//! Calldata fixtures are encoded with `sol!` bindings so the selectors and
//! parameter words are exactly what a wallet would send.

use alloy_primitives::{address, keccak256, Address, B256, U256};
use alloy_sol_types::{sol, SolCall};

use govlens::domain::abi::{
    calldata, ContractDirectory, DecodeError, DecodedValue, FunctionEntry, InterfaceCatalog,
    InterfaceEntry, ParamSpec, SelectorHasher,
};
use govlens::infrastructure::abi::{AbiScanner, AlloyParamDecoder, Keccak256Hasher};
use govlens::infrastructure::CalldataDecoder;
use govlens::modules::toolkit::selector::{extract_selector, function_selector};

sol! {
    function transfer(address to, uint256 amount);
    function upgrade(address proxy, address implementation);
    function setDelegatorMinStake(uint256 _minStake);
    function setValue(uint256 value);
    function register(string name, uint8[] weights);
}

const STAKING: Address = address!("1100000000000000000000000000000000000001");
const PROXY_ADMIN: Address = address!("2200000000000000000000000000000000000002");
const TOKEN: Address = address!("3300000000000000000000000000000000000003");
const RECIPIENT: Address = address!("4400000000000000000000000000000000000004");

const PROXY_ADMIN_ABI: &str = r#"[
    {"type":"function","name":"upgrade","stateMutability":"nonpayable","outputs":[],"inputs":[
        {"name":"proxy","type":"address"},{"name":"implementation","type":"address"}]},
    {"type":"function","name":"transfer","stateMutability":"nonpayable","outputs":[],"inputs":[
        {"name":"recipient","type":"address"},{"name":"value","type":"uint256"}]}
]"#;

const STAKING_ABI: &str = r#"{"contractName":"StakingHbbft","abi":[
    {"type":"function","name":"setDelegatorMinStake","stateMutability":"nonpayable","outputs":[],"inputs":[
        {"name":"_minStake","type":"uint256"}]},
    {"type":"event","name":"PlacedStake","anonymous":false,"inputs":[
        {"name":"toPoolStakingAddress","type":"address","indexed":true}]}
]}"#;

fn token_catalog() -> InterfaceCatalog {
    InterfaceCatalog::new(
        "Token",
        vec![
            InterfaceEntry::Function(FunctionEntry::new(
                "transfer",
                vec![
                    ParamSpec::new("to", "address"),
                    ParamSpec::new("amount", "uint256"),
                ],
            )),
            InterfaceEntry::Function(FunctionEntry::new(
                "register",
                vec![
                    ParamSpec::new("name", "string"),
                    ParamSpec::new("weights", "uint8[]"),
                ],
            )),
        ],
    )
}

fn directory() -> ContractDirectory {
    let proxy_admin = AbiScanner::parse_catalog("ProxyAdmin", PROXY_ADMIN_ABI)
        .unwrap()
        .unwrap();
    let staking = AbiScanner::parse_catalog("StakingHbbft", STAKING_ABI)
        .unwrap()
        .unwrap();

    ContractDirectory::new()
        .with_priority(proxy_admin)
        .with_contract("Staking", STAKING, staking)
        .with_contract("Token", TOKEN, token_catalog())
}

fn hex_call(call: &impl SolCall) -> String {
    format!("0x{}", hex::encode(call.abi_encode()))
}

#[test]
fn test_selector_round_trip() {
    let calls = [
        hex_call(&transferCall {
            to: RECIPIENT,
            amount: U256::from(1),
        }),
        hex_call(&setDelegatorMinStakeCall {
            _minStake: U256::from(1000),
        }),
        hex_call(&upgradeCall {
            proxy: STAKING,
            implementation: RECIPIENT,
        }),
    ];
    let signatures = [
        "transfer(address,uint256)",
        "setDelegatorMinStake(uint256)",
        "upgrade(address,address)",
    ];

    for (calldata, signature) in calls.iter().zip(signatures) {
        assert_eq!(
            extract_selector(calldata).unwrap(),
            function_selector(&Keccak256Hasher, signature)
        );
    }
}

#[test]
fn test_decode_setter_on_contract() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&setDelegatorMinStakeCall {
        _minStake: U256::from(5_000_000_000_000_000_000u128),
    });

    let call = decoder
        .decode_call_data(&directory(), &STAKING.to_string(), &calldata)
        .unwrap()
        .unwrap();

    assert_eq!(call.function_name, "setDelegatorMinStake");
    assert_eq!(call.catalog, "StakingHbbft");
    assert_eq!(
        call.get("_minStake"),
        Some(&DecodedValue::Uint(U256::from(5_000_000_000_000_000_000u128)))
    );

    let rows = call.entries();
    assert_eq!(rows[0], ("Function Name".to_string(), "setDelegatorMinStake".to_string()));
    assert_eq!(rows.len(), 2);
}

#[test]
fn test_priority_catalog_wins() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&transferCall {
        to: RECIPIENT,
        amount: U256::from(42),
    });

    // both ProxyAdmin (priority) and Token know transfer(address,uint256)
    let call = decoder
        .decode_call_data(&directory(), &TOKEN.to_string(), &calldata)
        .unwrap()
        .unwrap();

    assert_eq!(call.catalog, "ProxyAdmin");
    assert_eq!(call.get("recipient"), Some(&DecodedValue::Address(RECIPIENT)));
    assert_eq!(call.get("value"), Some(&DecodedValue::Uint(U256::from(42))));
    assert!(call.get("to").is_none());

    // without the priority catalog the contract's own names are used
    let plain = ContractDirectory::new().with_contract("Token", TOKEN, token_catalog());
    let call = decoder
        .decode_call_data(&plain, &TOKEN.to_string(), &calldata)
        .unwrap()
        .unwrap();
    assert_eq!(call.catalog, "Token");
    assert_eq!(call.get("to"), Some(&DecodedValue::Address(RECIPIENT)));
}

#[test]
fn test_embedded_address_resolves_target() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&upgradeCall {
        proxy: STAKING,
        implementation: RECIPIENT,
    });

    // the admin itself is not registered; the proxy in the first word is
    let call = decoder
        .decode_call_data(&directory(), &PROXY_ADMIN.to_string(), &calldata)
        .unwrap()
        .unwrap();

    assert_eq!(call.function_name, "upgrade");
    assert_eq!(call.get("proxy"), Some(&DecodedValue::Address(STAKING)));
    assert_eq!(call.get("implementation"), Some(&DecodedValue::Address(RECIPIENT)));
}

#[test]
fn test_unknown_selector_is_empty() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&setValueCall {
        value: U256::from(7),
    });

    let result = decoder
        .decode_call_data(&directory(), &STAKING.to_string(), &calldata)
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn test_unresolved_target_is_error() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&setValueCall {
        value: U256::from(7),
    });

    let err = decoder
        .decode_call_data(&directory(), &RECIPIENT.to_string(), &calldata)
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnresolvedTarget { .. }));

    let err = decoder
        .decode_call_data(&directory(), "not an address", "0xdeadbeef")
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnresolvedTarget { .. }));
}

#[test]
fn test_short_calldata_fails_fast() {
    let decoder = CalldataDecoder::new();
    for short in ["", "0x", "0x1234567"] {
        let err = decoder
            .decode_call_data(&directory(), &STAKING.to_string(), short)
            .unwrap_err();
        assert!(matches!(err, DecodeError::CalldataTooShort { len } if len == short.len()));
    }
}

#[test]
fn test_truncated_parameters_fail() {
    let decoder = CalldataDecoder::new();
    let calldata = hex_call(&registerCall {
        name: "pool".to_string(),
        weights: vec![1, 2, 3],
    });
    let truncated = &calldata[..calldata.len() - 64];

    let err = decoder
        .decode_call_data(&directory(), &TOKEN.to_string(), truncated)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Parameters { .. }));

    let call = decoder
        .decode_call_data(&directory(), &TOKEN.to_string(), &calldata)
        .unwrap()
        .unwrap();
    assert_eq!(call.get("name"), Some(&DecodedValue::Text("pool".to_string())));
    assert_eq!(call.get("weights").map(|v| v.to_string()).as_deref(), Some("[1,2,3]"));
}

/// Hasher that maps one exact payload to a chosen digest
struct PinnedHasher {
    payload: Vec<u8>,
    digest: B256,
}

impl SelectorHasher for PinnedHasher {
    fn digest(&self, data: &[u8]) -> B256 {
        if data == self.payload.as_slice() {
            self.digest
        } else {
            keccak256(data)
        }
    }
}

#[test]
fn test_zero_selector_rederived_from_payload() {
    let calldata = format!("0x00000000{:064x}", 99u64);

    // real keccak: the selector is the head of the payload digest
    let decoder = CalldataDecoder::new();
    let payload = calldata::payload_bytes(&calldata);
    let expected = keccak256(&payload);
    assert_eq!(decoder.selector_of(&calldata).unwrap(), expected[..4]);

    // pin the payload digest onto setValue(uint256) and decode through it
    let mut digest = [0u8; 32];
    digest[..4].copy_from_slice(&keccak256("setValue(uint256)")[..4]);
    let hasher = PinnedHasher {
        payload,
        digest: B256::from(digest),
    };
    let decoder = CalldataDecoder::with_parts(hasher, AlloyParamDecoder);

    let catalog = InterfaceCatalog::new(
        "Store",
        vec![InterfaceEntry::Function(FunctionEntry::new(
            "setValue",
            vec![ParamSpec::new("value", "uint256")],
        ))],
    );
    let directory = ContractDirectory::new().with_contract("Store", TOKEN, catalog);

    let call = decoder
        .decode_call_data(&directory, &TOKEN.to_string(), &calldata)
        .unwrap()
        .unwrap();
    assert_eq!(call.function_name, "setValue");
    assert_eq!(call.get("value"), Some(&DecodedValue::Uint(U256::from(99))));
}
