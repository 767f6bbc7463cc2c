//! Contract screen: shows the selected option and collects the user's consent.
use crate::logic::{Command, Logic, Out, OutOf};
use crate::model::{
    Amount, Confirmation, PaymentMethodKind, PaymentOption, SavePaymentMethod, SelectedOption,
    TokenizeInputModel, TokenizeInstrument,
};
use crate::CheckoutError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractContent {
    pub shop_title: String,
    pub shop_subtitle: String,
    pub option: PaymentOption,
    pub is_single_payment_method: bool,
    pub save_payment_method: SavePaymentMethod,
    pub should_save_payment_method: bool,
    pub allow_wallet_linking: bool,
    pub confirmation: Confirmation,
    pub user_authorized: bool,
}

impl ContractContent {
    fn from_selected(selected: SelectedOption) -> Self {
        let should_save_payment_method = selected.option.save_payment_method_allowed
            && selected.save_payment_method == SavePaymentMethod::On;
        Self {
            shop_title: selected.shop_title,
            shop_subtitle: selected.shop_subtitle,
            is_single_payment_method: selected.allowed_methods == 1,
            save_payment_method: selected.save_payment_method,
            should_save_payment_method,
            allow_wallet_linking: true,
            confirmation: selected.confirmation,
            user_authorized: selected.user_authorized,
            option: selected.option,
        }
    }

    /// Fee-free Google Pay with nothing for the user to decide.
    fn pays_with_google_pay_directly(&self) -> bool {
        let asks_to_save = self.option.save_payment_method_allowed
            && self.save_payment_method != SavePaymentMethod::Off;
        matches!(self.option.kind, PaymentMethodKind::GooglePay)
            && self.option.is_fee_free()
            && !asks_to_save
    }

    /// Leaving the contract ends the checkout when no other method could be picked.
    fn leave_effect(&self) -> ContractEffect {
        if self.is_single_payment_method {
            ContractEffect::CancelProcess
        } else {
            ContractEffect::RestartProcess
        }
    }

    fn tokenize_input(&self, csc: Option<String>) -> TokenizeInputModel {
        let instrument = match &self.option.kind {
            PaymentMethodKind::SavedBankCard(instrument) => TokenizeInstrument::SavedBankCard {
                instrument: instrument.clone(),
                csc,
            },
            PaymentMethodKind::LinkedCard(card) => TokenizeInstrument::LinkedCard {
                card: card.clone(),
                csc,
            },
            PaymentMethodKind::GooglePay => TokenizeInstrument::GooglePay,
            _ => TokenizeInstrument::Option,
        };
        let is_wallet_based = matches!(
            self.option.kind,
            PaymentMethodKind::Wallet { .. } | PaymentMethodKind::LinkedCard(_)
        );
        TokenizeInputModel {
            payment_option_id: self.option.id,
            save_payment_method: self.should_save_payment_method,
            save_payment_instrument: self.should_save_payment_method
                && matches!(self.option.kind, PaymentMethodKind::NewCard),
            allow_wallet_linking: self.allow_wallet_linking && !is_wallet_based,
            confirmation: self.confirmation.clone(),
            instrument,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractState {
    Loading,
    Content(ContractContent),
    /// Fee-free Google Pay: tokenizes without waiting for the user.
    GooglePay(ContractContent),
    Error(CheckoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractAction {
    Load,
    Retry,
    LoadContractSuccess(SelectedOption),
    LoadContractFailed(CheckoutError),
    ChangeSavePaymentMethod(bool),
    ChangeAllowWalletLinking(bool),
    Tokenize { csc: Option<String> },
    TokenizeCancelled,
    RestartProcess,
    Logout,
    LogoutSuccessful,
    LogoutFailed(CheckoutError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractEffect {
    ShowTokenize(TokenizeInputModel),
    StartGooglePay(Amount),
    RestartProcess,
    CancelProcess,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCommand {
    SelectPaymentOption,
    Logout,
}

impl Command for ContractCommand {
    type Action = ContractAction;

    fn failed(&self, error: CheckoutError) -> ContractAction {
        match self {
            ContractCommand::SelectPaymentOption => ContractAction::LoadContractFailed(error),
            ContractCommand::Logout => ContractAction::LogoutFailed(error),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContractLogic;

impl Logic for ContractLogic {
    type State = ContractState;
    type Action = ContractAction;
    type Effect = ContractEffect;
    type Command = ContractCommand;

    fn reduce(&self, state: ContractState, action: ContractAction) -> OutOf<Self> {
        match state {
            ContractState::Loading => loading(action),
            ContractState::Content(content) => content_state(content, action),
            ContractState::GooglePay(content) => google_pay(content, action),
            ContractState::Error(error) => error_state(error, action),
        }
    }
}

fn loading(action: ContractAction) -> OutOf<ContractLogic> {
    match action {
        ContractAction::Load => {
            Out::new(ContractState::Loading).input(ContractCommand::SelectPaymentOption)
        }
        ContractAction::LoadContractSuccess(selected) => {
            let content = ContractContent::from_selected(selected);
            if content.pays_with_google_pay_directly() {
                let charge = content.option.charge.clone();
                Out::new(ContractState::GooglePay(content))
                    .output(ContractEffect::StartGooglePay(charge))
                    .source()
            } else {
                Out::new(ContractState::Content(content)).source()
            }
        }
        ContractAction::LoadContractFailed(error) => {
            Out::new(ContractState::Error(error)).source()
        }
        _ => Out::skip(ContractState::Loading),
    }
}

fn content_state(mut content: ContractContent, action: ContractAction) -> OutOf<ContractLogic> {
    match action {
        ContractAction::ChangeSavePaymentMethod(save) => {
            content.should_save_payment_method = save && content.option.save_payment_method_allowed;
            Out::new(ContractState::Content(content)).source()
        }
        ContractAction::ChangeAllowWalletLinking(allow) => {
            content.allow_wallet_linking = allow;
            Out::new(ContractState::Content(content)).source()
        }
        ContractAction::Tokenize { csc } => {
            let model = content.tokenize_input(csc);
            Out::new(ContractState::Content(content))
                .output(ContractEffect::ShowTokenize(model))
                .source()
        }
        ContractAction::TokenizeCancelled => Out::new(ContractState::Content(content)).source(),
        ContractAction::RestartProcess => {
            Out::new(ContractState::Content(content)).output(ContractEffect::RestartProcess)
        }
        ContractAction::Logout => {
            Out::new(ContractState::Content(content)).input(ContractCommand::Logout)
        }
        ContractAction::LogoutSuccessful => {
            let effect = content.leave_effect();
            Out::new(ContractState::Content(content)).output(effect)
        }
        ContractAction::LogoutFailed(_) => Out::new(ContractState::Content(content)).source(),
        _ => Out::skip(ContractState::Content(content)),
    }
}

fn google_pay(content: ContractContent, action: ContractAction) -> OutOf<ContractLogic> {
    match action {
        ContractAction::Tokenize { csc } => {
            let model = content.tokenize_input(csc);
            Out::new(ContractState::GooglePay(content))
                .output(ContractEffect::ShowTokenize(model))
                .source()
        }
        // Google Pay sheet dismissed: there is no contract screen to return to.
        ContractAction::TokenizeCancelled => {
            let effect = content.leave_effect();
            Out::new(ContractState::GooglePay(content)).output(effect)
        }
        _ => Out::skip(ContractState::GooglePay(content)),
    }
}

fn error_state(error: CheckoutError, action: ContractAction) -> OutOf<ContractLogic> {
    match action {
        ContractAction::Load | ContractAction::Retry => {
            Out::new(ContractState::Loading).input(ContractCommand::SelectPaymentOption)
        }
        ContractAction::RestartProcess => {
            Out::new(ContractState::Error(error)).output(ContractEffect::RestartProcess)
        }
        _ => Out::skip(ContractState::Error(error)),
    }
}
