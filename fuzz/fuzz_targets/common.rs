use openzl::DecompressStrategy;

#[derive(arbitrary::Arbitrary)]
pub struct FuzzInput {
    pub data: Vec<u8>,
    pub strategy: Strategy,
}

impl std::fmt::Debug for FuzzInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzInput")
            .field("strategy", &self.strategy)
            .field("data", &HexSlice(&self.data))
            .finish()
    }
}

#[derive(arbitrary::Arbitrary, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    ExactSize,
    BoundedGuess,
}

impl From<Strategy> for DecompressStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::ExactSize => DecompressStrategy::ExactSize,
            Strategy::BoundedGuess => DecompressStrategy::BoundedGuess,
        }
    }
}

pub struct HexSlice<'a>(pub &'a [u8]);

impl std::fmt::Debug for HexSlice<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const MAX: usize = 32;

        let total = self.0.len();
        let shown = total.min(MAX);

        let mut list = f.debug_list();

        for v in &self.0[..shown] {
            list.entry(&format_args!("{v:#04x}"));
        }

        if total > MAX {
            list.entry(&format_args!(".. out of {total} total"));
        }

        list.finish()
    }
}
