mod identity_provider;
mod mailer;

pub use identity_provider::{
    ExternalIdentity, IIdentityProvider, LocalIdentityProvider, ManagementApiIdentityProvider,
};
pub use mailer::{IMailer, InMemoryMailer, Mail, SmtpMailer};
