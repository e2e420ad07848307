//! Packet record builder shared by the integration tests.

#![allow(dead_code)]

pub struct Pkt {
    pub ts: &'static str,
    pub src: &'static str,
    pub dst: &'static str,
    pub sport: u16,
    pub dport: u16,
    pub size: i64,
    pub window: i64,
    pub ttl: i64,
    /// FIN, SYN, RST, PSH, ACK, URG
    pub flags: [u8; 6],
    pub content_type: Option<&'static str>,
}

pub const FIN: usize = 0;
pub const SYN: usize = 1;
pub const ACK: usize = 4;

impl Pkt {
    pub fn up(ts: &'static str) -> Self {
        Self {
            ts,
            src: "1.1.1.1",
            dst: "2.2.2.2",
            sport: 80,
            dport: 443,
            size: 60,
            window: 1000,
            ttl: 64,
            flags: [0; 6],
            content_type: None,
        }
    }

    pub fn down(ts: &'static str) -> Self {
        Self {
            src: "2.2.2.2",
            dst: "1.1.1.1",
            sport: 443,
            dport: 80,
            ..Self::up(ts)
        }
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn window(mut self, window: i64) -> Self {
        self.window = window;
        self
    }

    pub fn ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn flag(mut self, flag: usize) -> Self {
        self.flags[flag] = 1;
        self
    }

    pub fn content_type(mut self, code: &'static str) -> Self {
        self.content_type = Some(code);
        self
    }

    pub fn fields(&self) -> Vec<String> {
        let mut f = vec![
            "0".to_string(),
            "100".to_string(),
            "eth0".to_string(),
            self.ts.to_string(),
            "0".to_string(),
            "0".to_string(),
            self.src.to_string(),
            self.dst.to_string(),
            self.sport.to_string(),
            self.dport.to_string(),
            self.size.to_string(),
            self.window.to_string(),
            self.ttl.to_string(),
        ];
        f.extend(self.flags.iter().map(|b| b.to_string()));
        if let Some(ct) = self.content_type {
            f.push(ct.to_string());
        }
        f
    }

    pub fn line(&self) -> String {
        self.fields().join(",")
    }
}
