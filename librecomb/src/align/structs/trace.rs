use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::align::AlignError;
use crate::alphabet::{UTF8_ONE, UTF8_ZERO};

/// The parental sequence that is responsible for (scored against) an alignment column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parent {
    Zero,
    One,
}

impl Parent {
    pub const BOTH: [Parent; 2] = [Parent::Zero, Parent::One];

    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Parent::Zero => 0,
            Parent::One => 1,
        }
    }

    #[inline]
    pub fn flip(self) -> Self {
        match self {
            Parent::Zero => Parent::One,
            Parent::One => Parent::Zero,
        }
    }

    pub fn label(self) -> u8 {
        match self {
            Parent::Zero => UTF8_ZERO,
            Parent::One => UTF8_ONE,
        }
    }

    pub fn from_label(label: u8) -> Result<Self, AlignError> {
        match label {
            UTF8_ZERO => Ok(Parent::Zero),
            UTF8_ONE => Ok(Parent::One),
            _ => Err(AlignError::InvalidParentLabel(char::from(label))),
        }
    }

    /// Parse a string of '0' and '1' characters into parent labels.
    pub fn parse_labels(labels: &str) -> Result<Vec<Self>, AlignError> {
        labels.bytes().map(Parent::from_label).collect()
    }

    pub fn labels_to_string(parents: &[Parent]) -> String {
        parents.iter().map(|p| char::from(p.label())).collect()
    }
}

impl Display for Parent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", char::from(self.label()))
    }
}

/// Serializes a parent labeling as a string of '0' and '1'.
pub fn serialize_parent_labels<S: Serializer>(
    parents: &[Parent],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    Parent::labels_to_string(parents).serialize(serializer)
}

/// How a traceback move walks through the DP matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StepShape {
    /// consumes a query residue and a parent column
    Diagonal,
    /// consumes a query residue only; the parents get gaps
    Row,
    /// consumes a parent column only; the query gets a gap
    Column,
}

/// The recurrence case that produced the best score in a DP cell.
///
/// The declaration order is the order that the cases are
/// tried in, and ties always go to the earlier case.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracebackMove {
    /// Only used for the (0, 0) origin cell, which is never read during traceback
    Origin,
    DiagonalStay,
    RowStay,
    ColumnStay,
    DiagonalSwitch,
    RowSwitch,
    ColumnSwitch,
}

impl TracebackMove {
    /// The interior recurrence cases, in tie-breaking order.
    pub const CANDIDATES: [TracebackMove; 6] = [
        TracebackMove::DiagonalStay,
        TracebackMove::RowStay,
        TracebackMove::ColumnStay,
        TracebackMove::DiagonalSwitch,
        TracebackMove::RowSwitch,
        TracebackMove::ColumnSwitch,
    ];

    /// Panics on `Origin`, which has no step.
    pub(crate) fn shape(self) -> StepShape {
        match self {
            TracebackMove::DiagonalStay | TracebackMove::DiagonalSwitch => StepShape::Diagonal,
            TracebackMove::RowStay | TracebackMove::RowSwitch => StepShape::Row,
            TracebackMove::ColumnStay | TracebackMove::ColumnSwitch => StepShape::Column,
            TracebackMove::Origin => panic!("the origin cell has no step shape"),
        }
    }

    pub fn is_switch(self) -> bool {
        matches!(
            self,
            TracebackMove::DiagonalSwitch | TracebackMove::RowSwitch | TracebackMove::ColumnSwitch
        )
    }

    /// A single character code, used when dumping the pointer matrices.
    pub fn code(self) -> char {
        match self {
            TracebackMove::Origin => '.',
            TracebackMove::DiagonalStay => 'D',
            TracebackMove::RowStay => 'R',
            TracebackMove::ColumnStay => 'C',
            TracebackMove::DiagonalSwitch => 'd',
            TracebackMove::RowSwitch => 'r',
            TracebackMove::ColumnSwitch => 'c',
        }
    }
}
