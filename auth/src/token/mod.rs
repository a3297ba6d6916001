pub mod access_token;
pub mod claims;
pub mod codec;
pub mod errors;

pub use access_token::AccessToken;
pub use claims::Claims;
pub use claims::Subject;
pub use codec::TokenCodec;
pub use errors::DecodeError;
pub use errors::TokenError;
