//! `declare_model!`: concrete model types from a field list.

/// Declare a concrete model type.
///
/// Each declared field gets a typed slot initialised from `Default` on fresh
/// construction. Keys outside the declared set survive reconstruction in the
/// model's `extra` record.
///
/// ```ignore
/// hbnb_core::declare_model! {
///     /// A city within a state.
///     City {
///         state_id: String,
///         name: String,
///         places: Vec<String>,
///     }
/// }
/// ```
#[macro_export]
macro_rules! declare_model {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$field_meta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            base: $crate::Base,
            $( $(#[$field_meta])* pub $field: $ty, )*
            extra: $crate::Record,
        }

        impl $name {
            /// Fresh construction; registers the new object with `storage`.
            pub fn new(storage: &dyn $crate::Storage) -> Self {
                <Self as $crate::ModelClass>::create(storage)
            }

            /// Reconstruction from a dictionary; `storage` is not notified.
            pub fn from_dict(record: $crate::Record) -> $crate::ModelResult<Self> {
                <Self as $crate::ModelClass>::from_dict(record)
            }

            /// Attributes outside the declared field set.
            pub fn extra(&self) -> &$crate::Record {
                &self.extra
            }
        }

        impl $crate::ModelClass for $name {
            const CLASS_NAME: &'static str = stringify!($name);

            fn with_base(base: $crate::Base) -> Self {
                Self {
                    base,
                    $( $field: <$ty as ::core::default::Default>::default(), )*
                    extra: $crate::Record::new(),
                }
            }

            #[allow(unused_mut)]
            fn from_base(
                base: $crate::Base,
                mut fields: $crate::Record,
            ) -> $crate::ModelResult<Self> {
                $(
                    let $field: $ty =
                        $crate::record::take_field(&mut fields, stringify!($field))?;
                )*
                Ok(Self {
                    base,
                    $( $field, )*
                    extra: fields,
                })
            }
        }

        impl $crate::Model for $name {
            fn class_name(&self) -> &'static str {
                <Self as $crate::ModelClass>::CLASS_NAME
            }

            fn base(&self) -> &$crate::Base {
                &self.base
            }

            fn base_mut(&mut self) -> &mut $crate::Base {
                &mut self.base
            }

            #[allow(unused_mut)]
            fn fields(&self) -> $crate::Record {
                let mut record = self.extra.clone();
                $( $crate::record::put_field(&mut record, stringify!($field), &self.$field); )*
                record
            }

            fn set_attribute(
                &mut self,
                key: &str,
                value: $crate::Value,
            ) -> $crate::ModelResult<()> {
                match key {
                    $( stringify!($field) => {
                        self.$field = $crate::record::decode_field(key, value)?;
                        Ok(())
                    } )*
                    _ => $crate::record::set_extra(&mut self.extra, key, value),
                }
            }

            fn as_model(&self) -> &dyn $crate::Model {
                self
            }

            fn clone_model(&self) -> ::std::boxed::Box<dyn $crate::Model> {
                ::std::boxed::Box::new(::core::clone::Clone::clone(self))
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::Model::describe(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::{Model, ModelClass, ModelError, Record, Storage, StorageError, timestamp};

    crate::declare_model! {
        /// Test model.
        Widget {
            label: String,
            size: i64,
            tags: Vec<String>,
        }
    }

    crate::declare_model! {
        Bare {}
    }

    #[derive(Default)]
    struct CallLog {
        calls: Mutex<Vec<String>>,
    }

    impl CallLog {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Storage for CallLog {
        fn new(&self, object: &dyn Model) {
            self.calls.lock().unwrap().push(format!("new {}", object.storage_key()));
        }

        fn update(&self, object: &dyn Model) {
            self.calls.lock().unwrap().push(format!("update {}", object.storage_key()));
        }

        fn save(&self) -> Result<(), StorageError> {
            self.calls.lock().unwrap().push("save".to_string());
            Ok(())
        }

        fn all(&self) -> Vec<Box<dyn Model>> {
            vec![]
        }
    }

    struct Failing;

    impl Storage for Failing {
        fn new(&self, _object: &dyn Model) {}

        fn update(&self, _object: &dyn Model) {}

        fn save(&self) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk full".to_string()))
        }

        fn all(&self) -> Vec<Box<dyn Model>> {
            vec![]
        }
    }

    fn widget_record() -> Record {
        let value = json!({
            "__class__": "Widget",
            "id": "0b6f1f4c-2f8e-4a59-9c6e-0f0e8a1d2c3b",
            "created_at": "2017-09-28T21:03:54.052298",
            "updated_at": "2017-09-28T21:03:54.052302",
            "label": "gear",
            "size": 3,
            "colour": "red"
        });
        value.as_object().unwrap().clone()
    }

    #[test]
    fn fresh_construction_registers_once() {
        let log = CallLog::default();
        let widget = Widget::new(&log);

        assert_eq!(log.calls(), vec![format!("new Widget.{}", widget.id())]);
        assert_eq!(widget.created_at(), widget.updated_at());
        assert_eq!(widget.label, "");
        assert_eq!(widget.size, 0);
        assert!(widget.tags.is_empty());
        assert!(widget.extra().is_empty());
    }

    #[test]
    fn reconstruction_does_not_touch_storage() {
        let widget = Widget::from_dict(widget_record()).unwrap();

        assert_eq!(widget.id().as_str(), "0b6f1f4c-2f8e-4a59-9c6e-0f0e8a1d2c3b");
        assert_eq!(widget.label, "gear");
        assert_eq!(widget.size, 3);
        assert!(widget.tags.is_empty());
        assert_eq!(widget.extra().get("colour"), Some(&json!("red")));
        assert!(!widget.extra().contains_key("__class__"));
    }

    #[test]
    fn to_dict_contains_every_attribute() {
        let widget = Widget::from_dict(widget_record()).unwrap();
        let dict = widget.to_dict();

        assert_eq!(dict.get("__class__"), Some(&json!("Widget")));
        assert_eq!(dict.get("created_at"), Some(&json!("2017-09-28T21:03:54.052298")));
        assert_eq!(dict.get("updated_at"), Some(&json!("2017-09-28T21:03:54.052302")));
        assert_eq!(dict.get("label"), Some(&json!("gear")));
        assert_eq!(dict.get("size"), Some(&json!(3)));
        assert_eq!(dict.get("tags"), Some(&json!([])));
        assert_eq!(dict.get("colour"), Some(&json!("red")));
        assert_eq!(dict.len(), 8);
    }

    #[test]
    fn to_dict_round_trips() {
        let widget = Widget::from_dict(widget_record()).unwrap();
        let again = Widget::from_dict(widget.to_dict()).unwrap();

        assert_eq!(again, widget);
        assert_eq!(again.to_dict(), widget.to_dict());
    }

    #[test]
    fn declared_field_with_wrong_type_is_rejected() {
        let mut record = widget_record();
        record.insert("size".to_string(), json!("big"));

        let err = Widget::from_dict(record).unwrap_err();
        assert!(matches!(err, ModelError::InvalidField { ref field, .. } if field == "size"));
    }

    #[test]
    fn describe_lists_class_id_and_attributes() {
        let widget = Widget::from_dict(widget_record()).unwrap();
        let text = widget.to_string();

        assert!(text.starts_with("[Widget] (0b6f1f4c-2f8e-4a59-9c6e-0f0e8a1d2c3b) {"));
        assert!(text.contains("\"created_at\": 2017-09-28T21:03:54.052298"));
        assert!(text.contains("\"label\": \"gear\""));
        assert!(text.contains("\"colour\": \"red\""));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn save_updates_snapshot_then_flushes() {
        let log = CallLog::default();
        let mut widget = Widget::from_dict(widget_record()).unwrap();
        let before = widget.updated_at();
        let created = widget.created_at();

        widget.save(&log).unwrap();

        assert!(widget.updated_at() >= before);
        assert_eq!(widget.created_at(), created);
        assert_eq!(widget.id().as_str(), "0b6f1f4c-2f8e-4a59-9c6e-0f0e8a1d2c3b");
        assert_eq!(
            log.calls(),
            vec![
                "update Widget.0b6f1f4c-2f8e-4a59-9c6e-0f0e8a1d2c3b".to_string(),
                "save".to_string(),
            ]
        );
    }

    #[test]
    fn save_surfaces_storage_failure() {
        let mut widget = Widget::from_dict(widget_record()).unwrap();
        let err = widget.save(&Failing).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }

    #[test]
    fn set_attribute_routes_by_name() {
        let mut widget = Widget::from_dict(widget_record()).unwrap();

        widget.set_attribute("label", json!("cog")).unwrap();
        widget.set_attribute("tags", json!(["a", "b"])).unwrap();
        widget.set_attribute("weight", json!(1.5)).unwrap();

        assert_eq!(widget.label, "cog");
        assert_eq!(widget.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(widget.extra().get("weight"), Some(&json!(1.5)));

        assert!(matches!(
            widget.set_attribute("size", json!("x")).unwrap_err(),
            ModelError::InvalidField { .. }
        ));
        assert_eq!(
            widget.set_attribute("id", json!("other")).unwrap_err(),
            ModelError::read_only("id")
        );
        assert_eq!(
            widget.set_attribute("updated_at", json!("2017-09-28T21:03:54.052302")).unwrap_err(),
            ModelError::read_only("updated_at")
        );
    }

    #[test]
    fn model_without_declared_fields() {
        let log = CallLog::default();
        let bare = Bare::new(&log);
        let dict = bare.to_dict();

        assert_eq!(dict.len(), 4);
        assert_eq!(<Bare as ModelClass>::CLASS_NAME, "Bare");
        assert_eq!(
            timestamp::parse("created_at", dict["created_at"].as_str().unwrap()).unwrap(),
            bare.created_at()
        );
    }

    #[test]
    fn clone_model_keeps_concrete_type() {
        let widget = Widget::from_dict(widget_record()).unwrap();
        let boxed = widget.clone_model();

        assert_eq!(boxed.class_name(), "Widget");
        assert_eq!(boxed.as_any().downcast_ref::<Widget>(), Some(&widget));
    }
}
