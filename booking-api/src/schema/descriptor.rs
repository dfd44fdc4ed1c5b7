//! `google.protobuf` descriptors built from the schema tables.
//!
//! The descriptor set backs gRPC server reflection, so tooling sees exactly
//! the tags the codec reads and writes.

use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet, FileOptions,
    MethodDescriptorProto, ServiceDescriptorProto,
};

use super::{BookingServiceSchema, FieldKind, MessageSchema, MethodSchema};
use crate::proto::{
    Book, CreateBookRequest, DeleteBookRequest, DeleteBookResponse, PACKAGE, ReadBookRequest,
    UpdateBookRequest,
};

pub const FILE_NAME: &str = "booking.proto";

pub fn file_descriptor_set() -> FileDescriptorSet {
    FileDescriptorSet {
        file: vec![file_descriptor()],
    }
}

pub fn file_descriptor() -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(FILE_NAME.into()),
        package: Some(PACKAGE.into()),
        message_type: vec![
            message_descriptor::<Book>(),
            message_descriptor::<CreateBookRequest>(),
            message_descriptor::<ReadBookRequest>(),
            message_descriptor::<UpdateBookRequest>(),
            message_descriptor::<DeleteBookRequest>(),
            message_descriptor::<DeleteBookResponse>(),
        ],
        service: vec![service_descriptor()],
        options: Some(FileOptions {
            go_package: Some("./test".into()),
            ..Default::default()
        }),
        syntax: Some("proto3".into()),
        ..Default::default()
    }
}

fn message_descriptor<M: MessageSchema>() -> DescriptorProto {
    DescriptorProto {
        name: Some(M::NAME.into()),
        field: M::FIELDS
            .iter()
            .map(|field| FieldDescriptorProto {
                name: Some(field.name.into()),
                number: Some(field.tag as i32),
                label: Some(field.label.descriptor_label() as i32),
                r#type: Some(field.kind.descriptor_type() as i32),
                type_name: match field.kind {
                    FieldKind::Message(type_name) => Some(type_name.into()),
                    _ => None,
                },
                json_name: Some(field.json_name.into()),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn service_descriptor() -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(BookingServiceSchema::NAME.into()),
        method: BookingServiceSchema::METHODS
            .iter()
            .map(method_descriptor)
            .collect(),
        ..Default::default()
    }
}

fn method_descriptor(method: &MethodSchema) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(method.name.into()),
        input_type: Some(method.input_type.into()),
        output_type: Some(method.output_type.into()),
        ..Default::default()
    }
}
