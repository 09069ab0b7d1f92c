pub(crate) mod proof;
pub(crate) mod stake;
pub(crate) mod tx;
pub(crate) mod units;
