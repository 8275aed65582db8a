use sha2::{Digest, Sha256};

use crate::api::MANILA_OPENSTACK_ORG;

/// Content whose digest is stamped on pod templates so that changes roll the pods.
pub trait Annotation {
    const NAME: &'static str;

    fn digest(&self, sha: &mut Sha256);

    #[must_use]
    fn sha_256(&self) -> String {
        let mut sha = Sha256::new();
        self.digest(&mut sha);
        format!("sha256:{:x}", sha.finalize())
    }

    #[must_use]
    fn to_tuple(&self) -> (String, String) {
        (
            format!("{MANILA_OPENSTACK_ORG}/{}-hash", Self::NAME),
            self.sha_256(),
        )
    }
}
