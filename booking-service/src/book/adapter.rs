use booking_api::proto::{
    Book, CreateBookRequest, DeleteBookRequest, DeleteBookResponse, ReadBookRequest,
    UpdateBookRequest, booking_service_server::BookingService,
};
use tonic::{Request, Response, Status};

use super::{
    create_book_command::CreateBookCommand,
    delete_book_command::DeleteBookCommand,
    query_manager::BookQueryManager,
    update_book_command::{UpdateBookCommand, UpdateBookCommandInput},
};

/// Binds the book handlers to the `BookingService` contract.
///
/// Both transports call into this type: the gRPC server directly and the HTTP
/// gateway through `dyn BookingService`.
#[derive(Debug)]
pub struct BookAdapter {
    book_query_manager: BookQueryManager,
    create_book_command: CreateBookCommand,
    update_book_command: UpdateBookCommand,
    delete_book_command: DeleteBookCommand,
}

impl BookAdapter {
    pub fn new(
        book_query_manager: BookQueryManager,
        create_book_command: CreateBookCommand,
        update_book_command: UpdateBookCommand,
        delete_book_command: DeleteBookCommand,
    ) -> Self {
        BookAdapter {
            book_query_manager,
            create_book_command,
            update_book_command,
            delete_book_command,
        }
    }
}

#[tonic::async_trait]
impl BookingService for BookAdapter {
    async fn create_book(
        &self,
        request: Request<CreateBookRequest>,
    ) -> Result<Response<Book>, Status> {
        // An absent book is the all-zero book.
        let book = request.into_inner().book.unwrap_or_default();

        let result = self.create_book_command.execute(book).await?;

        Ok(Response::new(result.book))
    }

    async fn read_book(&self, request: Request<ReadBookRequest>) -> Result<Response<Book>, Status> {
        let request = request.into_inner();

        let book = self.book_query_manager.query_single(request.id).await?;

        Ok(Response::new(book))
    }

    async fn update_book(
        &self,
        request: Request<UpdateBookRequest>,
    ) -> Result<Response<Book>, Status> {
        let request = request.into_inner();

        let result = self
            .update_book_command
            .execute(UpdateBookCommandInput {
                id: request.id,
                book: request.book.unwrap_or_default(),
            })
            .await?;

        Ok(Response::new(result.book))
    }

    async fn delete_book(
        &self,
        request: Request<DeleteBookRequest>,
    ) -> Result<Response<DeleteBookResponse>, Status> {
        let request = request.into_inner();

        self.delete_book_command.execute(request.id).await?;

        Ok(Response::new(DeleteBookResponse {
            success: true,
            ..Default::default()
        }))
    }
}
