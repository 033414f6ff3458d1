/// Passive per-session read statistics
///
/// Counters only; updated by the reading session, queried by the caller.

use crate::protocol::StreamType;

#[derive(Debug, Clone, Default)]
pub struct ReadStats {
    total_frames: u64,
    quote_frames: u64,
    deal_frames: u64,
    own_order_frames: u64,
    own_trade_frames: u64,
    message_frames: u64,
    aux_info_frames: u64,
    ord_log_frames: u64,
}

impl ReadStats {
    pub fn new() -> Self {
        ReadStats::default()
    }

    pub(crate) fn record_frame(&mut self, stream_type: StreamType) {
        self.total_frames += 1;
        let counter = match stream_type {
            StreamType::Quotes => &mut self.quote_frames,
            StreamType::Deals => &mut self.deal_frames,
            StreamType::OwnOrders => &mut self.own_order_frames,
            StreamType::OwnTrades => &mut self.own_trade_frames,
            StreamType::Messages => &mut self.message_frames,
            StreamType::AuxInfo => &mut self.aux_info_frames,
            StreamType::OrdLog => &mut self.ord_log_frames,
        };
        *counter += 1;
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn frames_for(&self, stream_type: StreamType) -> u64 {
        match stream_type {
            StreamType::Quotes => self.quote_frames,
            StreamType::Deals => self.deal_frames,
            StreamType::OwnOrders => self.own_order_frames,
            StreamType::OwnTrades => self.own_trade_frames,
            StreamType::Messages => self.message_frames,
            StreamType::AuxInfo => self.aux_info_frames,
            StreamType::OrdLog => self.ord_log_frames,
        }
    }
}
