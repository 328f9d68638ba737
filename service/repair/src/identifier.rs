use domain_repair::service::IdentifierService;
use rand::{rngs::OsRng, Rng, RngCore};

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentifierService;

impl IdentifierService for RandomIdentifierService {
    fn request_number(&self) -> String {
        rand::thread_rng().gen_range(100_000..=999_999).to_string()
    }

    fn tracking_token(&self) -> String {
        let mut bytes = [0u8; 16];
        OsRng.fill_bytes(&mut bytes);
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
