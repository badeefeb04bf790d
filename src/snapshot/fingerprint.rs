use sha1::{Digest, Sha1};

use crate::snapshot::element::{Element, SelectorKind};

/// Hex SHA-1 over every element field that reconstruction must preserve.
///
/// Each field is length-prefixed so adjacent values cannot run together.
pub fn fingerprint(elements: &[Element]) -> String {
    let mut hasher = Sha1::new();

    for el in elements {
        hasher.update(el.id.to_le_bytes());
        feed(&mut hasher, &el.tag);
        feed(&mut hasher, &el.text);

        hasher.update((el.attributes.len() as u64).to_le_bytes());
        for (name, value) in &el.attributes {
            feed(&mut hasher, name);
            feed(&mut hasher, value);
        }

        for kind in SelectorKind::ALL {
            match el.selector(kind) {
                Some(value) => {
                    hasher.update([1u8]);
                    feed(&mut hasher, value);
                }
                None => hasher.update([0u8]),
            }
        }

        hasher.update([el.visible as u8]);
    }

    format!("{:x}", hasher.finalize())
}

fn feed(hasher: &mut Sha1, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}
