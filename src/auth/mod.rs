pub mod error;
pub mod provider;
pub mod resolver;

pub use error::AuthError;
pub use provider::{
    AccountKind, ActiveDevice, ActiveSocket, ConnectedAccount, SessionAndDevice,
    SessionProvider, StaticSessionProvider,
};
pub use resolver::{Credential, CredentialResolver};
