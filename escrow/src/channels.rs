//! [`PaymentChannels`] - the escrow of unidirectional payment channels.
//!
//! Every operation either fully commits or leaves both the escrow and the ledger untouched:
//! all preconditions are checked first, the ledger request is the last fallible step
//! and the registry is updated only after the ledger accepted the request.
use adapter::{ClaimAuthorizer, TokenLedger};
use primitives::{Address, Channel, ChannelKey, Config, Event, Session, U256};
use slog::{debug, info, warn, Logger};

use crate::{
    error::{NotClaimable, Party},
    registry::ChannelRegistry,
    settlement::Settlement,
    Clock, Error,
};

/// Unidirectional payment channels escrowed in [`Config::contract`].
///
/// Mutating operations take `&mut self`, so only one of them can run at a time.
/// The caller is always a verified [`Session`], never an address passed by the caller.
pub struct PaymentChannels<L, C> {
    config: Config,
    authorizer: ClaimAuthorizer,
    registry: ChannelRegistry,
    ledger: L,
    clock: C,
    events: Vec<Event>,
    logger: Logger,
}

impl<L: TokenLedger, C: Clock> PaymentChannels<L, C> {
    pub fn new(config: Config, ledger: L, clock: C, logger: Logger) -> Self {
        Self {
            authorizer: ClaimAuthorizer::new(config.contract),
            config,
            registry: ChannelRegistry::new(),
            ledger,
            clock,
            events: Vec::new(),
            logger,
        }
    }

    /// Funds a new channel from `sender` to `recipient`.
    ///
    /// The caller is the funder, which may be someone other than the sender.
    /// None of the parties may be the escrow itself.
    /// The funder must have approved the escrow to pull `amount` on the ledger.
    pub fn open(
        &mut self,
        session: &Session,
        sender: Address,
        recipient: Address,
        amount: U256,
    ) -> Result<(), Error> {
        let funder = session.uid;
        let key = ChannelKey::new(sender, recipient);

        let valid = [
            (Party::Funder, funder),
            (Party::Sender, sender),
            (Party::Recipient, recipient),
        ]
        .into_iter()
        .find(|(_, address)| address.is_zero() || *address == self.config.contract)
        .map_or(Ok(()), |(party, _)| Err(Error::InvalidParty(party)))
        .and_then(|_| match amount.is_zero() {
            true => Err(Error::InvalidAmount),
            false => Ok(()),
        })
        .and_then(|_| self.registry.ensure_closed(&key));

        if let Err(err) = valid {
            debug!(self.logger, "Rejected opening of channel"; "channel" => %key, "funder" => %funder, "error" => %err);

            return Err(err);
        }

        self.ledger
            .transfer_from(self.config.contract, funder, self.config.contract, amount)
            .map_err(|err| {
                debug!(self.logger, "Ledger rejected the deposit"; "channel" => %key, "funder" => %funder, "amount" => %amount, "error" => %err);

                Error::ledger(err)
            })?;

        self.registry.record_open(key, amount);
        self.events.push(Event::OpenedChannel {
            funder,
            sender,
            recipient,
            deposit: amount,
        });

        info!(self.logger, "Opened channel"; "channel" => %key, "funder" => %funder, "deposit" => %amount);

        Ok(())
    }

    /// Starts the dispute window of the caller's (the sender's) channel to `recipient`.
    ///
    /// Calling it again while the window is pending restarts the window from now.
    pub fn initiate_closure(&mut self, session: &Session, recipient: Address) -> Result<(), Error> {
        let key = ChannelKey::new(session.uid, recipient);
        let closure_time = self.clock.now().saturating_add(self.config.secs_closure);

        let previous = self
            .registry
            .set_closure_time(&key, closure_time)
            .map_err(|err| {
                debug!(self.logger, "Rejected closure intent"; "channel" => %key, "error" => %err);

                err
            })?;

        if previous != 0 {
            warn!(self.logger, "Closure intent overwrites a pending one"; "channel" => %key, "previous_closure_time" => previous, "closure_time" => closure_time);
        }

        self.events.push(Event::InitiatedChannelClosure {
            sender: key.sender,
            recipient: key.recipient,
            closure_time,
        });

        info!(self.logger, "Initiated channel closure"; "channel" => %key, "closure_time" => closure_time);

        Ok(())
    }

    /// The caller (the recipient) settles the channel from `sender`
    /// by presenting the sender's signed claim of `amount`.
    ///
    /// The rest of the deposit is refunded to the sender.
    pub fn cooperative_close(
        &mut self,
        session: &Session,
        sender: Address,
        amount: U256,
        signature: &[u8],
    ) -> Result<(), Error> {
        let key = ChannelKey::new(sender, session.uid);

        let valid = self.ensure_claimable_by_recipient(&key, amount, signature);

        match valid {
            Ok(channel) => self.settle(key, channel, amount),
            Err(err) => {
                debug!(self.logger, "Rejected cooperative close"; "channel" => %key, "amount" => %amount, "error" => %err);

                Err(err)
            }
        }
    }

    /// The caller (the sender) settles the channel to `recipient` without a signature,
    /// once the dispute window it started has elapsed.
    ///
    /// `amount` is the last amount the sender signed for the recipient.
    ///
    /// The channel is always `(caller, recipient)`. A caller which is not the sender,
    /// e.g. the recipient passing the sender, gets [`Error::ChannelNotClaimable`]
    /// for its own reversed channel, usually [`NotClaimable::Closed`].
    pub fn claim_after_timeout(
        &mut self,
        session: &Session,
        recipient: Address,
        amount: U256,
    ) -> Result<(), Error> {
        let key = ChannelKey::new(session.uid, recipient);
        let channel = self.registry.channel(&key);
        let now = self.clock.now();

        let reason = match (channel.is_open, channel.closure_time) {
            (false, _) => Some(NotClaimable::Closed),
            (true, 0) => Some(NotClaimable::NoClosureInitiated),
            (true, closure_time) if now < closure_time => {
                Some(NotClaimable::DisputeWindowActive { closure_time, now })
            }
            (true, _) => None,
        };

        match reason {
            None => self.settle(key, channel, amount),
            Some(reason) => {
                let err = Error::ChannelNotClaimable { key, reason };
                debug!(self.logger, "Rejected claim after timeout"; "channel" => %key, "amount" => %amount, "error" => %err);

                Err(err)
            }
        }
    }

    fn ensure_claimable_by_recipient(
        &self,
        key: &ChannelKey,
        amount: U256,
        signature: &[u8],
    ) -> Result<Channel, Error> {
        let channel = self.registry.channel(key);

        if !channel.is_active() {
            return Err(Error::ChannelNotClaimable {
                key: *key,
                reason: NotClaimable::Closed,
            });
        }

        let authorized = self
            .authorizer
            .authorize(key.sender, amount, signature)
            .map_err(|malformed| Error::MalformedSignature(malformed.length))?;

        match authorized {
            true => Ok(channel),
            false => Err(Error::SignatureMismatch(key.sender)),
        }
    }

    /// Pays out the deposit and resets the channel.
    fn settle(&mut self, key: ChannelKey, channel: Channel, claimed: U256) -> Result<(), Error> {
        let settlement = Settlement::compute(channel.deposit, claimed).map_err(|err| {
            debug!(self.logger, "Rejected settlement"; "channel" => %key, "error" => %err);

            err
        })?;

        self.ledger
            .transfer(self.config.contract, &settlement.transfers(&key))
            .map_err(|err| {
                debug!(self.logger, "Ledger rejected the settlement payouts"; "channel" => %key, "error" => %err);

                Error::ledger(err)
            })?;

        self.registry.reset(&key);
        self.events.push(Event::ClosedChannel {
            sender: key.sender,
            recipient: key.recipient,
            remainder_to_sender: settlement.to_sender,
            amount_to_recipient: settlement.to_recipient,
        });

        info!(self.logger, "Closed channel"; "channel" => %key, "to_recipient" => %settlement.to_recipient, "to_sender" => %settlement.to_sender);

        Ok(())
    }

    /// An unknown pair reads as the closed [`Channel::default()`].
    pub fn channel(&self, sender: Address, recipient: Address) -> Channel {
        self.registry.channel(&ChannelKey::new(sender, recipient))
    }

    /// Every event, in the order the operations were committed.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// The sum of all deposits, which is always the escrow's balance on the ledger.
    pub fn total_deposits(&self) -> U256 {
        self.registry.total_deposits()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// The ledger is shared with other parties,
    /// e.g. funders approving the escrow or tokens being minted.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ManualClock;
    use adapter::{
        ethereum::{
            claim::sign_claim,
            test_util::{RECIPIENT, SENDER, SENDER_KEY},
        },
        DummyLedger,
    };
    use pretty_assertions::assert_eq;
    use primitives::{
        test_util::{CONFIG, FUNDER},
        util::logging::discard_logger,
        ChannelState,
    };

    const NOW: u64 = 1_700_000_000;

    fn setup() -> PaymentChannels<DummyLedger, ManualClock> {
        let mut ledger = DummyLedger::new();
        ledger.mint(*FUNDER, 1_000.into()).expect("Should mint");
        ledger.approve(*FUNDER, CONFIG.contract, 1_000.into());

        PaymentChannels::new(CONFIG.clone(), ledger, ManualClock::new(NOW), discard_logger())
    }

    #[test]
    fn open_and_cooperative_close() {
        let mut channels = setup();

        channels
            .open(&Session::new(*FUNDER, 0), *SENDER, *RECIPIENT, 100.into())
            .expect("Should open");
        assert_eq!(
            Channel::funded(100.into()),
            channels.channel(*SENDER, *RECIPIENT)
        );
        assert_eq!(U256::from(100), channels.ledger().balance_of(CONFIG.contract));

        let signature =
            sign_claim(&SENDER_KEY, CONFIG.contract, 40.into()).expect("Should sign");
        channels
            .cooperative_close(
                &Session::new(*RECIPIENT, 0),
                *SENDER,
                40.into(),
                signature.as_bytes(),
            )
            .expect("Should close");

        assert_eq!(ChannelState::Closed, channels.channel(*SENDER, *RECIPIENT).state());
        assert_eq!(U256::from(40), channels.ledger().balance_of(*RECIPIENT));
        assert_eq!(U256::from(60), channels.ledger().balance_of(*SENDER));
        assert_eq!(U256::zero(), channels.total_deposits());
        assert_eq!(2, channels.events().len());
    }

    #[test]
    fn closure_is_keyed_by_the_caller() {
        let mut channels = setup();
        channels
            .open(&Session::new(*FUNDER, 0), *SENDER, *RECIPIENT, 100.into())
            .expect("Should open");

        // the recipient can't start the sender's dispute window
        assert!(matches!(
            channels.initiate_closure(&Session::new(*RECIPIENT, 0), *SENDER),
            Err(Error::ChannelNotOpen(key)) if key == ChannelKey::new(*RECIPIENT, *SENDER)
        ));

        channels
            .initiate_closure(&Session::new(*SENDER, 0), *RECIPIENT)
            .expect("Should initiate closure");
        assert_eq!(
            NOW + CONFIG.secs_closure,
            channels.channel(*SENDER, *RECIPIENT).closure_time
        );
    }

    #[test]
    fn malformed_signature_before_settling() {
        let mut channels = setup();
        channels
            .open(&Session::new(*FUNDER, 0), *SENDER, *RECIPIENT, 100.into())
            .expect("Should open");

        assert!(matches!(
            channels.cooperative_close(&Session::new(*RECIPIENT, 0), *SENDER, 40.into(), &[1; 64]),
            Err(Error::MalformedSignature(64))
        ));
        assert_eq!(
            Channel::funded(100.into()),
            channels.channel(*SENDER, *RECIPIENT)
        );
        assert_eq!(1, channels.events().len());
    }
}
