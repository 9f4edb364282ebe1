//! Business services containing domain logic and use cases.

pub mod verification;

pub use verification::{
    extract_code, Answered, AuthorityChain, Clock, EmailDelivery, EmailMessage, KeyValueStore,
    LocalVerificationAuthority, ManualClock, SendPurpose, SystemClock, VerificationAuthority,
    VerificationManager, VerificationServiceConfig, VerificationState, DEFAULT_DISPLAY_NAME,
};
