use serde::{Deserialize, Serialize};

use crate::{Address, U256};

/// Observable, append-only record of every successful state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    OpenedChannel {
        funder: Address,
        sender: Address,
        recipient: Address,
        deposit: U256,
    },
    #[serde(rename_all = "camelCase")]
    InitiatedChannelClosure {
        sender: Address,
        recipient: Address,
        closure_time: u64,
    },
    /// **NOTE:** `remainder_to_sender` is what was left in the channel
    /// after paying the recipient, not the deposit before settling.
    /// The two amounts sum up to the settled deposit.
    #[serde(rename_all = "camelCase")]
    ClosedChannel {
        sender: Address,
        recipient: Address,
        remainder_to_sender: U256,
        amount_to_recipient: U256,
    },
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn serializes_tagged_events() {
        let sender = Address::from([0x11; 20]);
        let recipient = Address::from([0x22; 20]);

        let event = Event::ClosedChannel {
            sender,
            recipient,
            remainder_to_sender: 60.into(),
            amount_to_recipient: 40.into(),
        };

        let expected = json!({
            "type": "ClosedChannel",
            "sender": sender.to_string(),
            "recipient": recipient.to_string(),
            "remainderToSender": "0x3c",
            "amountToRecipient": "0x28",
        });

        assert_eq!(expected, serde_json::to_value(&event).expect("Should serialize"));
    }
}
