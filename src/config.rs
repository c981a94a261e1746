/*!

The configuration of every component of the router is expressed with a [ConfigurationValue].
These values are built programmatically, e.g., by the driver embedding the library or by the tests.

```ignore
let allocator_cv = ConfigurationValue::Object("Islip".to_string(),vec![
	("num_iterations".to_string(),ConfigurationValue::Number(2f64)),
]);
```

Builders destructure the objects with the [`match_object_panic!`](crate::match_object_panic) macro.

*/

use crate::error::*;
use crate::error;
use crate::pipeline::Time;

///A value of the configuration tree. Component builders receive an `Object` whose name selects
///the implementation and whose pairs give its parameters.
#[derive(Clone,Debug,PartialEq)]
pub enum ConfigurationValue
{
	Literal(String),
	Number(f64),
	Object(String,Vec<(String,ConfigurationValue)>),
	Array(Vec<ConfigurationValue>),
	///A list of alternative values. Kept for compatibility with experiment descriptions; the
	///builders of this crate reject it.
	Experiments(Vec<ConfigurationValue>),
	True,
	False,
	None,
}

impl ConfigurationValue
{
	pub fn as_bool(&self) -> Result<bool,Error>
	{
		match self
		{
			&ConfigurationValue::True => Ok(true),
			&ConfigurationValue::False => Ok(false),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_str(&self) -> Result<&str,Error>
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => Ok(s),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_f64(&self) -> Result<f64,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) => Ok(x),
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_usize(&self) -> Result<usize,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>
			{
				let res = x as usize;
				//Casting from a float to an integer rounds towards zero, so complain when the
				//number was not close to an integer in the first place.
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance
				{
					Err(error!(ill_formed_configuration, self.clone()))
				}
				else
				{
					Ok(res)
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	pub fn as_i32(&self) -> Result<i32,Error>
	{
		match self
		{
			&ConfigurationValue::Number(x) =>
			{
				let res = x as i32;
				let y = res as f64;
				let tolerance = 1e-5;
				if x-y > tolerance || x-y < -tolerance
				{
					Err(error!(ill_formed_configuration, self.clone()))
				}
				else
				{
					Ok(res)
				}
			},
			_ => Err(error!(ill_formed_configuration, self.clone() )),
		}
	}
	///An amount of cycles.
	pub fn as_time(&self) -> Result<Time,Error>
	{
		self.as_usize().map(|value|value as Time)
	}
	///Give a new name to an Object. Employed to resolve aliases of component names.
	pub fn rename(&mut self, new_name:String)
	{
		match self
		{
			&mut ConfigurationValue::Object(ref mut name, ref _pairs) => *name = new_name,
			_ => panic!("Trying to rename a non-Object"),
		}
	}
	///A compact single-line representation, mostly for messages to the terminal.
	pub fn format_terminal(&self) -> String
	{
		match self
		{
			&ConfigurationValue::Literal(ref s) => format!("\"{}\"",s),
			&ConfigurationValue::Number(x) => format!("{}",x),
			&ConfigurationValue::Object(ref name, ref pairs) =>
			{
				let content = pairs.iter().map(|(key,value)|format!("{}:{}",key,value.format_terminal())).collect::<Vec<String>>().join(", ");
				format!("{}{{{}}}",name,content)
			},
			&ConfigurationValue::Array(ref list) =>
			{
				let content = list.iter().map(|value|value.format_terminal()).collect::<Vec<String>>().join(", ");
				format!("[{}]",content)
			},
			&ConfigurationValue::Experiments(ref list) =>
			{
				let content = list.iter().map(|value|value.format_terminal()).collect::<Vec<String>>().join(", ");
				format!("![{}]",content)
			},
			&ConfigurationValue::True => "true".to_string(),
			&ConfigurationValue::False => "false".to_string(),
			&ConfigurationValue::None => "none".to_string(),
		}
	}
}

/// match arms against the keys of an object
/// first argument, `$cv:expr`, is the ConfigurationValue expected to be the object
/// second argument, `$name:literal`, is the name the Object should have.
/// third argument, `$valueid:ident`, is the variable name capturing the value in the object's elements
///    and can be used in the arms
/// the remaining arguments are the arms of the match.
#[macro_export]
macro_rules! match_object{
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		match_object!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				if $names.len()==1 {
					panic!("A {} must be created from a `{}` object not `{}`",$names[0],$names[0],cv_name);
				} else {
					panic!("Trying to create either of `{:?}` object from `{}`",$names,cv_name);
				}
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					_ => return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Nothing to do with field {} in {}",name,$names.get(0).unwrap_or(&"None")))),
				}
			}
		}
		else
		{
			return Err($crate::error!(ill_formed_configuration,$cv.clone()).with_message(format!("Trying to create a {} from a non-Object",$names.get(0).unwrap_or(&"None"))));
		}
	}};
}

///Like `match_object!` but panicking on errors.
#[macro_export]
macro_rules! match_object_panic{
	($cv:expr, $name:literal, $valueid:ident ) => {{
		match_object_panic!($cv,[$name],$valueid,)
	}};
	($cv:expr, $name:literal, $valueid:ident, $($arm:tt)* ) => {{
		match_object_panic!($cv,[$name],$valueid,$($arm)*)
	}};
	($cv:expr, $names:expr, $valueid:ident, $($arm:tt)* ) => {{
		if let &$crate::config::ConfigurationValue::Object(ref cv_name, ref cv_pairs) = $cv
		{
			if !$names.iter().any(|&x|x==cv_name)
			{
				if $names.len()==1 {
					panic!("A {} must be created from a `{}` object not `{}`",$names[0],$names[0],cv_name);
				} else {
					panic!("Trying to create either of `{:?}` object from `{}`",$names,cv_name);
				}
			}
			for &(ref name,ref $valueid) in cv_pairs
			{
				match AsRef::<str>::as_ref(&name)
				{
					$( $arm )*
					_ => panic!("Nothing to do with field {} in {}",name,$names[0]),
				}
			}
		}
		else
		{
			panic!("Trying to create a {} from a non-Object",$names[0]);
		}
	}};
}

#[cfg(test)]
mod tests
{
	use super::*;
	#[test]
	fn accessors()
	{
		assert_eq!( ConfigurationValue::Number(3f64).as_usize().unwrap() , 3 );
		assert_eq!( ConfigurationValue::Number(7f64).as_time().unwrap() , 7u64 );
		assert_eq!( ConfigurationValue::True.as_bool().unwrap() , true );
		assert!( ConfigurationValue::Number(3.5f64).as_usize().is_err() );
		assert!( ConfigurationValue::Literal("hello".to_string()).as_f64().is_err() );
	}
	#[test]
	fn renaming()
	{
		let mut cv = ConfigurationValue::Object("Islip".to_string(),vec![]);
		cv.rename("ISLIP".to_string());
		if let ConfigurationValue::Object(name,_) = cv
		{
			assert_eq!(name,"ISLIP");
		}
		else
		{
			panic!("not an object");
		}
	}
	#[test]
	fn terminal_format()
	{
		let cv = ConfigurationValue::Object("InputQueued".to_string(),vec![
			("virtual_channels".to_string(),ConfigurationValue::Number(4f64)),
			("hold_switch_for_packet".to_string(),ConfigurationValue::True),
		]);
		assert_eq!( cv.format_terminal() , "InputQueued{virtual_channels:4, hold_switch_for_packet:true}" );
	}
}
