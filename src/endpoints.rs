//! The URIs served by the app.

/// The home page.
pub const ROOT: &str = "/";
/// The page for depositing into and withdrawing from the account.
pub const PAY_VIEW: &str = "/pay";
/// The page for transferring money to another account.
pub const TRANSFER_VIEW: &str = "/transfer";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for the transaction history fragment (GET) and for deposits and withdrawals (POST).
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route that re-renders the deposit/withdraw buttons for the current form values.
pub const TRANSACTION_CONTROLS: &str = "/api/transactions/controls";
/// The route for creating a transfer.
pub const TRANSFERS_API: &str = "/api/transfers";
/// The route that re-renders the transfer button for the current form values.
pub const TRANSFER_CONTROLS: &str = "/api/transfers/controls";
/// The route for toggling dark mode.
pub const THEME_API: &str = "/api/theme";
