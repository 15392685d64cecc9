// Copyright 2025 Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

/// A wrapper around a AWS-LC digest context that hashes a sequence of byte slices as if they were
/// concatenated
pub(crate) struct Hasher {
    inner: aws_lc_rs::digest::Context,
}

impl Hasher {
    pub(crate) fn new(algorithm: &'static aws_lc_rs::digest::Algorithm) -> Self {
        Self {
            inner: aws_lc_rs::digest::Context::new(algorithm),
        }
    }

    pub(crate) fn update(&mut self, data: &[u8]) -> &mut Self {
        self.inner.update(data);

        self
    }

    pub(crate) fn finalize(self) -> aws_lc_rs::digest::Digest {
        self.inner.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunked_update_matches_one_shot_digest() {
        let algorithm = &aws_lc_rs::digest::SHA384;
        let mut hasher = Hasher::new(algorithm);

        hasher.update(b"Calling EFI ").update(b"").update(b"Application");

        assert_eq!(
            hasher.finalize().as_ref(),
            aws_lc_rs::digest::digest(algorithm, b"Calling EFI Application").as_ref()
        );
    }
}
