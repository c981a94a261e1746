/*!

The `Error` type employed by the fallible operations of the crate.

Errors are built with the [`error!`](crate::error!) macro, which captures the source location where
the error was detected. Example: `error!(ill_formed_configuration,cv.clone()).with_message("a number was expected".to_string())`.

Note that most invariant violations of the allocation cycle are programming defects and abort via panic
instead of returning an `Error`. See the documentation of the router module.

*/

use std::fmt::{self,Display,Formatter};

use crate::config::ConfigurationValue;

///The point of the source code where an error was detected. Captured by the `source_location!` macro.
#[derive(Debug,Clone,Copy)]
pub struct SourceLocation
{
	pub file: &'static str,
	pub line: u32,
}

impl Display for SourceLocation
{
	fn fmt(&self, formatter:&mut Formatter) -> fmt::Result
	{
		write!(formatter,"{}:{}",self.file,self.line)
	}
}

///Captures the source location in which the macro is expanded.
#[macro_export]
macro_rules! source_location{
	() => {{
		$crate::error::SourceLocation{ file: file!(), line: line!() }
	}};
}

///Builds an [Error] of the given kind at the current source location.
///The identifier is the name of one of the constructor methods of `Error` and the
///remaining arguments are given to that constructor.
#[macro_export]
macro_rules! error{
	($kind:ident $(, $arg:expr )* ) => {{
		$crate::error::Error::$kind( $crate::source_location!() $(, $arg )* )
	}};
}

///The different kinds of error at the switch allocation layer.
#[derive(Debug)]
pub enum ErrorKind
{
	///A ConfigurationValue was not of the shape expected by some builder.
	IllFormedConfiguration{ value: ConfigurationValue },
	///Two configuration options that cannot be used together, such as a routing delay in an architecture requiring lookahead routing.
	IncompatibleConfiguration,
	///Tried to extract a flit from a virtual channel with no stored flits.
	EmptyVirtualChannel{ port:usize, virtual_channel:usize },
	///Some error not covered by the other kinds.
	Undetermined,
}

///An error with the source location where it was detected and an optional explanation message.
#[derive(Debug)]
pub struct Error
{
	pub source_location: SourceLocation,
	pub kind: ErrorKind,
	pub message: Option<String>,
}

impl Error
{
	pub fn new(source_location:SourceLocation, kind:ErrorKind) -> Error
	{
		Error{
			source_location,
			kind,
			message: None,
		}
	}
	///Attach an explanation to the error.
	pub fn with_message(mut self, message:String) -> Error
	{
		self.message = Some(message);
		self
	}
	pub fn ill_formed_configuration(source_location:SourceLocation, value:ConfigurationValue) -> Error
	{
		Error::new(source_location,ErrorKind::IllFormedConfiguration{value})
	}
	pub fn incompatible_configuration(source_location:SourceLocation) -> Error
	{
		Error::new(source_location,ErrorKind::IncompatibleConfiguration)
	}
	pub fn empty_virtual_channel(source_location:SourceLocation, port:usize, virtual_channel:usize) -> Error
	{
		Error::new(source_location,ErrorKind::EmptyVirtualChannel{port,virtual_channel})
	}
	pub fn undetermined(source_location:SourceLocation) -> Error
	{
		Error::new(source_location,ErrorKind::Undetermined)
	}
}

impl Display for Error
{
	fn fmt(&self, formatter:&mut Formatter) -> fmt::Result
	{
		write!(formatter,"Error at {}: {:?}",self.source_location,self.kind)?;
		if let Some(ref message) = self.message
		{
			write!(formatter,"\n{}",message)?;
		}
		Ok(())
	}
}
