//! Signer sets required per operation.

use anchor_lang::prelude::*;

use crate::error::LockFundError;
use crate::state::{ConfigAccount, UpdateActorMode};

/// Identities that must have signed, matched against the stored record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerPolicy {
    Authority,
    AuthorityAndApprover,
}

/// Every instruction that needs a signer check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreateConfig,
    UpdateConfig(UpdateActorMode),
    Transfer,
}

impl Operation {
    pub fn signer_policy(self) -> SignerPolicy {
        match self {
            Operation::CreateConfig => SignerPolicy::Authority,
            Operation::UpdateConfig(mode) => mode.signer_policy(),
            Operation::Transfer => SignerPolicy::AuthorityAndApprover,
        }
    }
}

impl SignerPolicy {
    /// `signers` holds the keys that actually signed the transaction. No
    /// quorum substitution: each required identity must appear as stored.
    pub fn authorize(
        self,
        config: &ConfigAccount,
        signers: &[Pubkey],
    ) -> std::result::Result<(), LockFundError> {
        self.authorize_keys(&config.authority, &config.approver, signers)
    }

    /// Same check against identities that are not stored yet.
    pub fn authorize_keys(
        self,
        authority: &Pubkey,
        approver: &Pubkey,
        signers: &[Pubkey],
    ) -> std::result::Result<(), LockFundError> {
        let signed = |key: &Pubkey| signers.iter().any(|s| s == key);

        if !signed(authority) {
            return Err(LockFundError::Unauthorized);
        }
        if self == SignerPolicy::AuthorityAndApprover && !signed(approver) {
            return Err(LockFundError::Unauthorized);
        }
        Ok(())
    }
}

/// Keys of the accounts that carry a signature.
pub fn signed_keys(accounts: &[AccountInfo]) -> Vec<Pubkey> {
    accounts
        .iter()
        .filter(|a| a.is_signer)
        .map(|a| *a.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ConfigAccount {
        let mut c: ConfigAccount = bytemuck::Zeroable::zeroed();
        c.authority = Pubkey::new_unique();
        c.approver = Pubkey::new_unique();
        c.recipient = Pubkey::new_unique();
        c
    }

    #[test]
    fn transfer_needs_both() {
        let c = config();
        let policy = Operation::Transfer.signer_policy();
        assert_eq!(policy.authorize(&c, &[c.authority, c.approver]), Ok(()));
        assert_eq!(policy.authorize(&c, &[c.approver, c.authority]), Ok(()));
        assert_eq!(
            policy.authorize(&c, &[c.authority]),
            Err(LockFundError::Unauthorized)
        );
        assert_eq!(
            policy.authorize(&c, &[c.approver]),
            Err(LockFundError::Unauthorized)
        );
        assert_eq!(policy.authorize(&c, &[]), Err(LockFundError::Unauthorized));
    }

    #[test]
    fn substituted_signers_are_rejected() {
        let c = config();
        let policy = Operation::Transfer.signer_policy();
        let imposter = Pubkey::new_unique();
        assert_eq!(
            policy.authorize(&c, &[imposter, c.approver]),
            Err(LockFundError::Unauthorized)
        );
        assert_eq!(
            policy.authorize(&c, &[c.authority, imposter]),
            Err(LockFundError::Unauthorized)
        );
        // recipient can not stand in for the approver
        assert_eq!(
            policy.authorize(&c, &[c.authority, c.recipient]),
            Err(LockFundError::Unauthorized)
        );
    }

    #[test]
    fn update_follows_actor_mode() {
        let c = config();
        let solo = Operation::UpdateConfig(UpdateActorMode::AuthorityOnly).signer_policy();
        assert_eq!(solo.authorize(&c, &[c.authority]), Ok(()));
        assert_eq!(solo.authorize(&c, &[c.approver]), Err(LockFundError::Unauthorized));

        let joint = Operation::UpdateConfig(UpdateActorMode::AuthorityAndApprover).signer_policy();
        assert_eq!(joint.authorize(&c, &[c.authority]), Err(LockFundError::Unauthorized));
        assert_eq!(joint.authorize(&c, &[c.authority, c.approver]), Ok(()));
    }

    #[test]
    fn create_needs_authority_only() {
        let c = config();
        let policy = Operation::CreateConfig.signer_policy();
        assert_eq!(policy, SignerPolicy::Authority);
        assert_eq!(policy.authorize_keys(&c.authority, &c.approver, &[c.authority]), Ok(()));
        assert_eq!(
            policy.authorize_keys(&c.authority, &c.approver, &[c.approver]),
            Err(LockFundError::Unauthorized)
        );
        assert_eq!(
            policy.authorize_keys(&c.authority, &c.approver, &[]),
            Err(LockFundError::Unauthorized)
        );
    }

    #[test]
    fn signed_keys_skips_unsigned_accounts() {
        let program = Pubkey::new_unique();
        let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mut la, mut lb) = (0u64, 0u64);
        let (mut da, mut db) = ([0u8; 0], [0u8; 0]);
        let signer = AccountInfo::new(&a, true, false, &mut la, &mut da, &program, false, 0);
        let other = AccountInfo::new(&b, false, false, &mut lb, &mut db, &program, false, 0);
        assert_eq!(signed_keys(&[signer, other]), vec![a]);
    }
}
