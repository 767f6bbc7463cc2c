//! Payment data shared by the workflows and their gateways.
use url::Url;

pub type OptionId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// Value in minor currency units (kopecks, cents).
    pub minor_units: i64,
    pub currency: String,
}

impl Amount {
    pub fn new(minor_units: i64, currency: impl Into<String>) -> Self {
        Self {
            minor_units,
            currency: currency.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankCardInstrument {
    pub payment_instrument_id: String,
    pub first6: String,
    pub last4: String,
    pub csc_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedCard {
    pub card_id: String,
    pub pan_fragment: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodKind {
    NewCard,
    /// Wallet of an authorized user.
    Wallet {
        wallet_id: String,
        balance: Amount,
    },
    /// Wallet entry shown before the user has logged in.
    AbstractWallet,
    /// Card bound inside the user's wallet.
    LinkedCard(LinkedCard),
    /// Card saved by the merchant for a returning customer.
    SavedBankCard(BankCardInstrument),
    GooglePay,
    SberBank,
    Sbp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOption {
    pub id: OptionId,
    pub charge: Amount,
    pub fee: Option<Amount>,
    pub save_payment_method_allowed: bool,
    pub kind: PaymentMethodKind,
}

impl PaymentOption {
    pub fn requires_auth(&self) -> bool {
        matches!(self.kind, PaymentMethodKind::AbstractWallet)
    }

    pub fn is_fee_free(&self) -> bool {
        self.fee.as_ref().is_none_or(Amount::is_zero)
    }

    pub fn method_type(&self) -> &'static str {
        match self.kind {
            PaymentMethodKind::NewCard | PaymentMethodKind::SavedBankCard(_) => "bankCard",
            PaymentMethodKind::Wallet { .. } | PaymentMethodKind::AbstractWallet => "wallet",
            PaymentMethodKind::LinkedCard(_) => "linkedCard",
            PaymentMethodKind::GooglePay => "googlePay",
            PaymentMethodKind::SberBank => "sberbank",
            PaymentMethodKind::Sbp => "sbp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePaymentMethod {
    On,
    #[default]
    Off,
    UserSelects,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Confirmation {
    #[default]
    None,
    External,
    Redirect {
        return_url: Url,
    },
    MobileApplication {
        return_url: Url,
    },
}

/// Instrument data submitted with a tokenize request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizeInstrument {
    /// The option itself is the instrument (wallet, SberPay, SBP, new card entered elsewhere).
    Option,
    SavedBankCard {
        instrument: BankCardInstrument,
        csc: Option<String>,
    },
    LinkedCard {
        card: LinkedCard,
        csc: Option<String>,
    },
    GooglePay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeInputModel {
    pub payment_option_id: OptionId,
    pub save_payment_method: bool,
    pub save_payment_instrument: bool,
    pub allow_wallet_linking: bool,
    pub confirmation: Confirmation,
    pub instrument: TokenizeInstrument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutputModel {
    pub token: String,
    pub option: PaymentOption,
    pub instrument: Option<BankCardInstrument>,
}

/// Result of the "select option" use case that opens the contract screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedOption {
    pub shop_title: String,
    pub shop_subtitle: String,
    pub option: PaymentOption,
    /// Number of payment methods the merchant allows for this checkout.
    pub allowed_methods: usize,
    pub save_payment_method: SavePaymentMethod,
    pub confirmation: Confirmation,
    pub user_authorized: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    InApp,
    App2App,
}

impl AuthType {
    pub fn label(self) -> &'static str {
        match self {
            AuthType::InApp => "inApp",
            AuthType::App2App => "app2App",
        }
    }
}

/// Second-factor session details for payment re-authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentAuthData {
    pub code_length: usize,
    pub attempts_left: Option<u32>,
    pub next_session_seconds: u32,
}
