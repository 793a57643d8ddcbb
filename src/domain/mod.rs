mod descriptor;
mod fields;

pub use descriptor::{
    ChangeHandler, FieldDescriptor, FieldKind, OptionProducer, OptionSource, SelectOption,
};
pub use fields::{FormFields, FormSection};
