//! The rental-exchange contract suite: descriptors, constructor wiring, and
//! the deployment address book.

use alloy_core::primitives::Address;
use anyhow::{Context, Result, bail};

/// Proxy factory wired into the exchange constructor.
pub const DEFAULT_PROXY_FACTORY: &str = "0x18bef085f6dD4Bf6c23aF90465c91cF68D5B74Cb";
/// Wrapped native token accepted by the exchange.
pub const DEFAULT_WETH: &str = "0x0Bb7509324cE409F7bbC4b701f932eAca9736AB7";
/// Recipient of protocol fees.
pub const DEFAULT_PROTOCOL_FEE_RECIPIENT: &str = "0x891e3465fCD6A67D13762487D2E326e0bF55De2F";
/// Fee taken by the fixed-price sale strategy, in basis points (4%).
pub const DEFAULT_STRATEGY_FEE_BPS: u64 = 400;

/// Protocol parameters threaded into the contract constructors.
#[derive(Debug, Clone)]
pub struct ProtocolParams {
    pub proxy_factory: Address,
    pub weth: Address,
    pub protocol_fee_recipient: Address,
    pub strategy_fee_bps: u64,
}

/// The eight contracts of the suite.
///
/// Declaration order is the deployment order: every contract's dependencies
/// are declared before it. [`crate::Deployer::deploy_all`] re-checks that
/// property before each deployment so a mistake in this table surfaces as an
/// error instead of a deployment with a missing constructor argument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum Contract {
    FixedPriceStrategy,
    CurrencyManager,
    ExecutionManager,
    ReceiptToken,
    Exchange,
    #[strum(serialize = "transferManagerERC721")]
    TransferManagerERC721,
    #[strum(serialize = "transferManagerERC1155")]
    TransferManagerERC1155,
    TransferSelector,
}

impl Contract {
    /// Path-qualified reference understood by `forge create` and
    /// `forge verify-contract`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::FixedPriceStrategy => {
                "src/strategies/StrategyStandardSaleForFixedPrice.sol:StrategyStandardSaleForFixedPrice"
            }
            Self::CurrencyManager => "src/CurrencyManager.sol:CurrencyManager",
            Self::ExecutionManager => "src/ExecutionManager.sol:ExecutionManager",
            Self::ReceiptToken => "src/ReceiptToken.sol:ReceiptToken",
            Self::Exchange => "src/RentalExchange.sol:RentalExchange",
            Self::TransferManagerERC721 => {
                "src/transferManagers/TransferManagerERC721.sol:TransferManagerERC721"
            }
            Self::TransferManagerERC1155 => {
                "src/transferManagers/TransferManagerERC1155.sol:TransferManagerERC1155"
            }
            Self::TransferSelector => "src/TransferSelectorNFT.sol:TransferSelectorNFT",
        }
    }

    /// Solidity contract name, the segment after the `:` in [`Self::path`].
    pub fn solidity_name(&self) -> &'static str {
        match self.path().rsplit_once(':') {
            Some((_, name)) => name,
            None => self.path(),
        }
    }

    /// Contracts whose deployed addresses this contract's constructor needs.
    pub fn dependencies(&self) -> &'static [Contract] {
        match self {
            Self::Exchange => &[
                Self::CurrencyManager,
                Self::ExecutionManager,
                Self::ReceiptToken,
            ],
            Self::TransferManagerERC721 | Self::TransferManagerERC1155 => &[Self::Exchange],
            Self::TransferSelector => {
                &[Self::TransferManagerERC721, Self::TransferManagerERC1155]
            }
            _ => &[],
        }
    }

    /// Solidity constructor signature used to ABI-encode the verification
    /// arguments, `None` when the constructor takes none.
    pub fn constructor_signature(&self) -> Option<&'static str> {
        match self {
            Self::FixedPriceStrategy => Some("constructor(uint256)"),
            Self::CurrencyManager | Self::ExecutionManager | Self::ReceiptToken => None,
            Self::Exchange => {
                Some("constructor(address,address,address,address,address,address)")
            }
            Self::TransferManagerERC721 | Self::TransferManagerERC1155 => {
                Some("constructor(address)")
            }
            Self::TransferSelector => Some("constructor(address,address)"),
        }
    }

    /// Positional constructor arguments, resolving dependency addresses from
    /// `book`. Order matches [`Self::constructor_signature`] exactly.
    pub fn constructor_args(
        &self,
        book: &AddressBook,
        params: &ProtocolParams,
    ) -> Result<Vec<String>> {
        let args = match self {
            Self::FixedPriceStrategy => vec![params.strategy_fee_bps.to_string()],
            Self::CurrencyManager | Self::ExecutionManager | Self::ReceiptToken => vec![],
            Self::Exchange => vec![
                book.get(Self::CurrencyManager)?.to_string(),
                book.get(Self::ExecutionManager)?.to_string(),
                params.proxy_factory.to_string(),
                book.get(Self::ReceiptToken)?.to_string(),
                params.weth.to_string(),
                params.protocol_fee_recipient.to_string(),
            ],
            Self::TransferManagerERC721 | Self::TransferManagerERC1155 => {
                vec![book.get(Self::Exchange)?.to_string()]
            }
            Self::TransferSelector => vec![
                book.get(Self::TransferManagerERC721)?.to_string(),
                book.get(Self::TransferManagerERC1155)?.to_string(),
            ],
        };
        Ok(args)
    }
}

/// Deployed addresses in deployment order, each written exactly once.
#[derive(Debug, Default)]
pub struct AddressBook {
    entries: Vec<(Contract, Address)>,
}

impl AddressBook {
    /// Records a deployed address. Each contract gets exactly one entry.
    pub fn insert(&mut self, contract: Contract, address: Address) -> Result<()> {
        if self.contains(contract) {
            bail!("{contract} already has a recorded address");
        }
        self.entries.push((contract, address));
        Ok(())
    }

    pub fn get(&self, contract: Contract) -> Result<Address> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == contract)
            .map(|(_, address)| *address)
            .with_context(|| format!("no deployed address recorded for {contract}"))
    }

    pub fn contains(&self, contract: Contract) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == contract)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in deployment order.
    pub fn iter(&self) -> impl Iterator<Item = (Contract, Address)> + '_ {
        self.entries.iter().copied()
    }
}
